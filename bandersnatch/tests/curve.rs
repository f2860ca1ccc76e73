//! Group law tests across the point representations.

use bandersnatch::{
    AffineFullPoint, AffinePoint, AffineSubgroupPoint, CurvePoint, ENDO_EIGENVALUE, EfghFullPoint,
    EfghSubgroupPoint, Error, ExtendedFullPoint, ExtendedSubgroupPoint, FieldElement, FullCurve,
    ORDER, TrustLevel, batch_to_affine, recover_x, recover_y,
};
use hex_literal::hex;
use proptest::{prelude::any, proptest};
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

#[test]
fn generator_is_valid() {
    let g = AffineSubgroupPoint::GENERATOR;
    assert!(g.is_valid());
    assert!(g.is_on_curve());
    assert!(g.is_in_subgroup());
    assert_eq!(
        g.x_affine().to_bytes(),
        hex!("18ae52a26618e7e1658499ad22c0792bf342be7b77113774c5340b2ccc32c129")
    );
    assert!(!g.y_affine().is_negative());
}

#[test]
fn generator_order() {
    let g = ExtendedFullPoint::GENERATOR;
    assert!(g.mul_vartime(&ORDER).is_neutral());
    assert!(!g.mul_vartime(&[2]).is_neutral());
    assert_eq!(g.mul_vartime(&[0]), ExtendedFullPoint::NEUTRAL);
    assert_eq!(g.mul_vartime(&[1]), g);
    assert_eq!(g.mul_vartime(&[5]), g.double().double() + g);
}

#[test]
fn endomorphism_eigenvalue() {
    let g = ExtendedSubgroupPoint::GENERATOR;
    assert_eq!(g.endo(), g.mul_vartime(&ENDO_EIGENVALUE));

    let g = AffineFullPoint::GENERATOR;
    assert_eq!(g.endo(), g.mul_vartime(&ENDO_EIGENVALUE));
}

#[test]
fn endomorphism_exceptional_inputs() {
    assert!(ExtendedFullPoint::NEUTRAL.endo().is_neutral());
    assert!(ExtendedFullPoint::A.endo().is_neutral());
    assert!(ExtendedFullPoint::E1.endo().is_nap());
    assert!(ExtendedFullPoint::NAP.endo().is_nap());
    assert_eq!(ExtendedFullPoint::E1.endo_full_curve(), ExtendedFullPoint::A);
    assert_eq!(EfghFullPoint::E2.endo_full_curve(), EfghFullPoint::A);
}

#[test]
fn two_torsion_structure() {
    let points = [
        ExtendedFullPoint::NEUTRAL,
        ExtendedFullPoint::A,
        ExtendedFullPoint::E1,
        ExtendedFullPoint::E2,
    ];
    for p in points {
        assert!(p.double().is_neutral());
        assert!(p.is_on_curve());
    }
    assert_eq!(ExtendedFullPoint::A + ExtendedFullPoint::E1, ExtendedFullPoint::E2);
    assert_eq!(ExtendedFullPoint::E1 + ExtendedFullPoint::E2, ExtendedFullPoint::A);
    assert!(ExtendedFullPoint::E1.is_at_infinity());
    assert!(!ExtendedFullPoint::A.is_at_infinity());
    assert!(!ExtendedFullPoint::A.is_in_subgroup());
    assert!(ExtendedFullPoint::A.is_in_good_subgroup());
    assert!(!ExtendedFullPoint::E1.is_in_good_subgroup());
}

#[test]
fn affine_infinity_becomes_nap() {
    let g = AffineFullPoint::GENERATOR;
    let shifted = (ExtendedFullPoint::GENERATOR + ExtendedFullPoint::E1).to_affine();
    // g - shifted is E1, which an affine point cannot hold.
    assert!((g - shifted).is_nap());
    assert!(ExtendedFullPoint::E2.to_affine().is_nap());
}

#[test]
fn nap_closure() {
    let g = ExtendedFullPoint::GENERATOR;
    let nap = ExtendedFullPoint::NAP;
    for p in [nap + g, g + nap, nap - g, -nap, nap.double(), nap.endo(), nap.endo_full_curve()] {
        assert!(p.is_nap());
    }
    assert!(EfghSubgroupPoint::NAP.double().is_nap());
    assert!(AffineSubgroupPoint::NAP.to_extended().is_nap());
    assert!(ExtendedSubgroupPoint::NAP.to_efgh().is_nap());
    assert!(!nap.is_on_curve());
    assert!(!nap.is_valid());
    assert!(!nap.is_in_subgroup());
    assert_eq!(nap.try_into_subgroup(), Err(Error::NaP));
}

#[test]
fn subgroup_conversions() {
    let g = ExtendedFullPoint::GENERATOR;
    assert_eq!(g.try_into_subgroup(), Ok(ExtendedSubgroupPoint::GENERATOR));
    assert_eq!(
        (g + ExtendedFullPoint::A).try_into_subgroup(),
        Err(Error::NotInSubgroup)
    );
    assert_eq!(ExtendedFullPoint::E1.try_into_subgroup(), Err(Error::AtInfinity));
    assert_eq!(
        ExtendedFullPoint::GENERATOR.clear_cofactor(),
        ExtendedSubgroupPoint::GENERATOR.double()
    );
    assert_eq!(
        AffineSubgroupPoint::GENERATOR.to_full_curve(),
        AffineFullPoint::GENERATOR
    );
    assert!(AffineFullPoint::A.try_into_subgroup().is_err());
}

#[test]
fn subgroup_points_are_taken_modulo_a() {
    let g = ExtendedSubgroupPoint::GENERATOR;
    let (x, y) = (ExtendedFullPoint::GENERATOR + ExtendedFullPoint::A).affine_coordinates();
    let shifted = ExtendedSubgroupPoint::from_affine_unchecked(x, y);
    assert!(shifted.is_valid());
    assert_eq!(shifted, g);
    assert_eq!(shifted.affine_coordinates(), g.affine_coordinates());
    assert!(!shifted.is_equal_mod_a(&ExtendedSubgroupPoint::NEUTRAL));

    let a_as_subgroup: ExtendedSubgroupPoint = ExtendedFullPoint::A.clear_cofactor();
    assert!(a_as_subgroup.is_neutral());
    assert!(g.is_equal_mod_a(&(ExtendedFullPoint::GENERATOR + ExtendedFullPoint::A)));
}

#[test]
fn untrusted_subgroup_input_must_be_exact() {
    let (x, y) = (ExtendedFullPoint::GENERATOR + ExtendedFullPoint::A).affine_coordinates();
    let trust = TrustLevel::Untrusted;
    assert_eq!(
        ExtendedSubgroupPoint::from_affine(x, y, trust),
        Err(Error::NotInSubgroup)
    );
    assert_eq!(
        EfghSubgroupPoint::from_x_and_sign_y(x, y.is_negative(), trust),
        Err(Error::NotInSubgroup)
    );
    assert_eq!(
        ExtendedSubgroupPoint::from_y_and_sign_x(y, x.is_negative(), trust),
        Err(Error::NotInSubgroup)
    );

    // The decaf constructors identify the two representatives instead.
    let shifted = AffineFullPoint::from_affine(x, y, trust).unwrap();
    let p = ExtendedSubgroupPoint::from_decaf_x(shifted.x_decaf_affine(), trust);
    assert_eq!(p, Ok(ExtendedSubgroupPoint::GENERATOR));

    let (gx, gy) = ExtendedSubgroupPoint::GENERATOR.affine_coordinates();
    let p = ExtendedSubgroupPoint::from_affine(gx, gy, trust).unwrap();
    assert_eq!(p.affine_coordinates(), (gx, gy));
}

#[test]
fn recovery() {
    let (x, y) = AffineFullPoint::GENERATOR.affine_coordinates();
    assert_eq!(recover_y(x), Some(y.abs()));
    assert_eq!(recover_x(y), Some(x.abs()));
    assert_eq!(recover_y(FieldElement::ZERO), Some(FieldElement::ONE));

    let p = AffineSubgroupPoint::from_x_and_sign_y(x, y.is_negative(), TrustLevel::Untrusted);
    assert_eq!(p, Ok(AffineSubgroupPoint::GENERATOR));
    let p = ExtendedSubgroupPoint::from_y_and_sign_x(y, x.is_negative(), TrustLevel::Untrusted);
    assert_eq!(p, Ok(ExtendedSubgroupPoint::GENERATOR));
    assert_eq!(
        AffineFullPoint::from_affine(x, x, TrustLevel::Trusted),
        Err(Error::NotOnCurve)
    );
}

#[test]
fn decaf_coordinates() {
    let g = ExtendedFullPoint::GENERATOR;
    let shifted = g + ExtendedFullPoint::A;
    assert_eq!(g.x_decaf_affine(), shifted.x_decaf_affine());
    assert_eq!(g.y_decaf_affine(), shifted.y_decaf_affine());
    assert!(!g.y_decaf_affine().is_negative());

    let (x, y, z) = shifted.decaf_projective_coordinates();
    assert_eq!(x * z.invert(), g.x_decaf_affine());
    assert_eq!(y * z.invert(), g.y_decaf_affine());

    let p = EfghSubgroupPoint::from_decaf_x(g.x_decaf_affine(), TrustLevel::Untrusted);
    assert_eq!(p, Ok(EfghSubgroupPoint::GENERATOR));
}

#[test]
fn batch_normalization() {
    let mut rng = rng(7);
    let points: Vec<EfghFullPoint> = (0..5)
        .map(|_| EfghFullPoint::random(&mut rng))
        .chain([EfghFullPoint::E1, EfghFullPoint::NEUTRAL])
        .collect();
    let mut out = vec![AffinePoint::<FullCurve>::NAP; points.len()];
    batch_to_affine(&points, &mut out);
    for (p, q) in points.iter().zip(&out).take(5) {
        assert!(q.is_equal(p));
    }
    assert!(out[5].is_nap());
    assert!(out[6].is_neutral());

    let extended = [
        ExtendedSubgroupPoint::GENERATOR,
        ExtendedSubgroupPoint::GENERATOR.double(),
    ];
    let affine = ExtendedSubgroupPoint::batch_normalize(&extended);
    assert_eq!(affine[0], AffineSubgroupPoint::GENERATOR);
    assert!(affine[1].is_equal(&extended[1]));
}

proptest! {
    #[test]
    fn group_axioms(seed in any::<u64>()) {
        let mut rng = rng(seed);
        let p = ExtendedFullPoint::random(&mut rng);
        let q = ExtendedFullPoint::random(&mut rng);
        let r = ExtendedFullPoint::random(&mut rng);
        let n = ExtendedFullPoint::NEUTRAL;

        assert!(p.is_valid());
        assert_eq!(p + q, q + p);
        assert_eq!((p + q) + r, p + (q + r));
        assert_eq!(p + n, p);
        assert!((p - p).is_neutral());
        assert_eq!(p + p, p.double());
        assert_eq!(p - q, p + (-q));
        assert_eq!(p + ExtendedFullPoint::E1 + ExtendedFullPoint::E1, p);
    }

    #[test]
    fn representations_agree(seed in any::<u64>()) {
        let mut rng = rng(seed);
        let p = ExtendedSubgroupPoint::random(&mut rng);
        let q = ExtendedSubgroupPoint::random(&mut rng);
        let (pa, qa) = (p.to_affine(), q.to_affine());
        let (pe, qe) = (p.to_efgh(), q.to_efgh());

        assert!(p.is_in_subgroup());
        assert!((pa + qa).is_equal(&(p + q)));
        assert!((pe + qe).is_equal(&(p + q)));
        assert_eq!(p + qa, p + q);
        assert_eq!(pa + q, p + q);
        assert_eq!(p - qa, p - q);
        assert!(pe.double().is_equal(&pa.double()));
        assert!(pe.endo().is_equal(&p.endo()));
    }

    #[test]
    fn aliasing_is_harmless(seed in any::<u64>()) {
        let mut rng = rng(seed);
        let p = ExtendedFullPoint::random(&mut rng);

        let mut q = p;
        q += p;
        assert_eq!(q, p.double());
        let mut q = p;
        q -= p;
        assert!(q.is_neutral());

        let mut a = p.to_affine();
        a += p.to_affine();
        assert_eq!(a, p.double().to_affine());
        let mut e = p.to_efgh();
        e.double_in_place();
        e.neg_in_place();
        assert_eq!(e, -p.double().to_efgh());
    }

    #[test]
    fn endomorphism_is_a_homomorphism(seed in any::<u64>()) {
        let mut rng = rng(seed);
        let p = ExtendedFullPoint::random(&mut rng);
        let q = ExtendedFullPoint::random(&mut rng);
        assert_eq!((p + q).endo_full_curve(), p.endo_full_curve() + q.endo_full_curve());

        let s = p.clear_cofactor();
        assert_eq!(s.endo(), s.mul_vartime(&ENDO_EIGENVALUE));
        assert!(s.mul_vartime(&ORDER).is_neutral());
    }

    #[test]
    fn cofactor_clearing(seed in any::<u64>()) {
        let mut rng = rng(seed);
        let p = AffineFullPoint::random(&mut rng);
        let s = p.clear_cofactor();
        assert!(s.is_valid());
        assert!(s.to_full_curve().is_in_subgroup());
        assert_eq!(s.to_full_curve().try_into_subgroup(), Ok(s));
    }
}
