//! Point serializer tests.

use bandersnatch::{
    AffineFullPoint, AffineSubgroupPoint, BitHeader, ByteOrder, CurvePoint, EfghFullPoint, Error,
    ExtendedFullPoint, ExtendedSubgroupPoint, PointSerializer, StreamError, TrustLevel,
    XAndSignYSerializer, XTimesSignYSerializer, XYSerializer, XYTimesSignYSerializer,
    YAndSignXSerializer,
};
use hex_literal::hex;
use proptest::{prelude::any, proptest};
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

fn roundtrip<S: PointSerializer, P: CurvePoint>(serializer: S, point: &P) -> P {
    let mut out = Vec::new();
    assert_eq!(
        serializer.serialize_point(&mut out, point),
        Ok(serializer.output_length())
    );
    assert_eq!(out.len(), serializer.output_length());
    let mut decoded = P::NAP;
    assert_eq!(
        serializer.deserialize_point(&mut out.as_slice(), TrustLevel::Untrusted, &mut decoded),
        Ok(serializer.output_length())
    );
    decoded
}

#[test]
fn x_and_sign_y_generator() {
    let serializer = XAndSignYSerializer::new();
    let mut out = Vec::new();
    serializer
        .serialize_point(&mut out, &AffineSubgroupPoint::GENERATOR)
        .unwrap();
    assert_eq!(
        out,
        hex!("18ae52a26618e7e1658499ad22c0792bf342be7b77113774c5340b2ccc32c129")
    );

    // G + A = (-x, -y) carries the sign bit.
    let shifted = AffineFullPoint::GENERATOR + AffineFullPoint::A;
    let mut out = Vec::new();
    serializer.serialize_point(&mut out, &shifted).unwrap();
    let minus_x = (-AffineFullPoint::GENERATOR.x_affine()).to_bytes();
    assert_eq!(out[..31], minus_x[..31]);
    assert_eq!(out[31], minus_x[31] | 0x80);

    // -G = (-x, y) does not.
    let mut out = Vec::new();
    serializer
        .serialize_point(&mut out, &-AffineSubgroupPoint::GENERATOR)
        .unwrap();
    assert_eq!(out, minus_x);
}

#[test]
fn x_and_sign_y_untrusted_rejects_points_outside_subgroup() {
    // x of the generator shifted by the point at infinity E1.
    let bytes = hex!("adfe74ab969f7d6c21d1821e9dde0dfaa1f9878ddd9476b4cfce8be09ed42c24");
    let mut point = ExtendedSubgroupPoint::GENERATOR;
    let err = XAndSignYSerializer::new()
        .deserialize_point(&mut bytes.as_slice(), TrustLevel::Untrusted, &mut point)
        .unwrap_err();
    assert_eq!(err.error, Error::NotInSubgroup);
    assert_eq!(err.bytes, 32);
    assert!(!err.partial);
    assert_eq!(point, ExtendedSubgroupPoint::GENERATOR);

    let mut point = ExtendedFullPoint::NEUTRAL;
    XAndSignYSerializer::new()
        .deserialize_point(&mut bytes.as_slice(), TrustLevel::Untrusted, &mut point)
        .unwrap();
    assert!(point.is_on_curve());
    assert!(!point.is_in_good_subgroup());
}

#[test]
fn points_in_sequence() {
    let serializer = YAndSignXSerializer::new().with_endianness(ByteOrder::BigEndian);
    let points = [
        EfghFullPoint::GENERATOR,
        EfghFullPoint::A,
        EfghFullPoint::GENERATOR.endo(),
    ];
    let mut out = Vec::new();
    for p in &points {
        serializer.serialize_point(&mut out, p).unwrap();
    }
    assert_eq!(out.len(), 96);

    let mut reader = out.as_slice();
    for p in &points {
        let mut q = EfghFullPoint::NEUTRAL;
        serializer
            .deserialize_point(&mut reader, TrustLevel::Untrusted, &mut q)
            .unwrap();
        assert_eq!(&q, p);
    }
    let mut q = EfghFullPoint::NEUTRAL;
    assert_eq!(
        serializer.deserialize_point(&mut reader, TrustLevel::Untrusted, &mut q),
        Err(StreamError::new(Error::Eof, 0, 32))
    );
}

#[test]
fn short_writer_reports_partial_output() {
    let mut buf = [0u8; 40];
    let mut writer = &mut buf[..];
    let err = XYSerializer::new()
        .serialize_point(&mut writer, &ExtendedFullPoint::GENERATOR)
        .unwrap_err();
    assert_eq!(err.error, Error::Io(std::io::ErrorKind::WriteZero));
    assert_eq!(err.bytes, 40);
    assert!(err.partial);
}

#[test]
fn trusted_input_skips_subgroup_checks() {
    let shifted = ExtendedFullPoint::GENERATOR + ExtendedFullPoint::E1;
    let mut out = Vec::new();
    XYSerializer::new().serialize_point(&mut out, &shifted).unwrap();

    let mut point = AffineSubgroupPoint::NEUTRAL;
    assert_eq!(
        XYSerializer::new().deserialize_point(
            &mut out.as_slice(),
            TrustLevel::Untrusted,
            &mut point
        ),
        Err(StreamError::new(Error::NotInSubgroup, 64, 64))
    );
    assert_eq!(
        XYSerializer::new().deserialize_point(&mut out.as_slice(), TrustLevel::Trusted, &mut point),
        Ok(64)
    );
}

#[test]
fn decaf_formats_take_points_modulo_a() {
    let g = ExtendedFullPoint::GENERATOR;
    let mut plain = Vec::new();
    let mut shifted = Vec::new();
    let serializer = XYTimesSignYSerializer::new();
    serializer.serialize_point(&mut plain, &g).unwrap();
    serializer
        .serialize_point(&mut shifted, &ExtendedSubgroupPoint::GENERATOR)
        .unwrap();
    assert_eq!(plain, shifted);

    let mut decoded = AffineFullPoint::A;
    serializer
        .deserialize_point(&mut plain.as_slice(), TrustLevel::Untrusted, &mut decoded)
        .unwrap();
    assert_eq!(decoded, AffineFullPoint::GENERATOR);
}

#[test]
fn headers_on_every_format() {
    let header = BitHeader::new(0, 1).unwrap();
    let g = ExtendedSubgroupPoint::GENERATOR;
    assert_eq!(
        roundtrip(XYSerializer::new().with_bit_headers(header, header), &g),
        g
    );
    assert_eq!(
        roundtrip(XAndSignYSerializer::new().with_bit_header(header), &g),
        g
    );
    assert_eq!(
        roundtrip(YAndSignXSerializer::new().with_bit_header(header), &g),
        g
    );
    assert_eq!(
        roundtrip(XTimesSignYSerializer::new().with_bit_header(header), &g),
        g
    );
    assert_eq!(
        roundtrip(
            XYTimesSignYSerializer::new().with_bit_headers(header, header),
            &g
        ),
        g
    );
}

#[test]
fn full_byte_headers() {
    let hx = BitHeader::new(0xa5, 8).unwrap();
    let hy = BitHeader::new(0x3c, 8).unwrap();
    let neutral = ExtendedSubgroupPoint::NEUTRAL;
    for order in [ByteOrder::BigEndian, ByteOrder::LittleEndian] {
        let serializer = XYSerializer::new()
            .with_endianness(order)
            .with_bit_headers(hx, hy);
        let mut out = Vec::new();
        serializer.serialize_point(&mut out, &neutral).unwrap();
        let (msb_x, msb_y) = match order {
            ByteOrder::BigEndian => (0, 32),
            ByteOrder::LittleEndian => (31, 63),
        };
        assert_eq!((out[msb_x], out[msb_y]), (0xa5, 0x3c));
        assert_eq!(roundtrip(serializer, &neutral), neutral);

        let serializer = XYTimesSignYSerializer::new()
            .with_endianness(order)
            .with_bit_headers(hx, hy);
        assert_eq!(roundtrip(serializer, &neutral), neutral);
        let serializer = XTimesSignYSerializer::new()
            .with_endianness(order)
            .with_bit_header(hx);
        assert_eq!(roundtrip(serializer, &neutral), neutral);

        // The generator's coordinates leave no room for a full byte.
        let mut out = Vec::new();
        assert_eq!(
            XYSerializer::new()
                .with_endianness(order)
                .with_bit_headers(hx, hy)
                .serialize_point(&mut out, &ExtendedSubgroupPoint::GENERATOR),
            Err(StreamError::untouched(Error::PrefixDoesNotFit))
        );
        assert!(out.is_empty());
    }

    // A mismatching header is caught before the coordinates are looked at.
    let mut out = Vec::new();
    XYSerializer::new()
        .with_bit_headers(hx, hy)
        .serialize_point(&mut out, &neutral)
        .unwrap();
    let mut point = ExtendedSubgroupPoint::GENERATOR;
    assert_eq!(
        XYSerializer::new()
            .with_bit_headers(hy, hy)
            .deserialize_point(&mut out.as_slice(), TrustLevel::Untrusted, &mut point),
        Err(StreamError::new(Error::PrefixMismatch, 64, 64))
    );
    assert_eq!(point, ExtendedSubgroupPoint::GENERATOR);
}

#[test]
fn shifted_coset_is_not_a_subgroup_point() {
    fn check<S: PointSerializer>(serializer: S, shifted: &ExtendedFullPoint) {
        let len = serializer.output_length();
        let mut out = Vec::new();
        serializer.serialize_point(&mut out, shifted).unwrap();

        let mut point = AffineSubgroupPoint::NEUTRAL;
        assert_eq!(
            serializer.deserialize_point(&mut out.as_slice(), TrustLevel::Untrusted, &mut point),
            Err(StreamError::new(Error::NotInSubgroup, len, len))
        );
        assert!(point.is_neutral());

        let mut point = ExtendedSubgroupPoint::NEUTRAL;
        assert_eq!(
            serializer.deserialize_point(&mut out.as_slice(), TrustLevel::Trusted, &mut point),
            Ok(len)
        );
        assert_eq!(point, ExtendedSubgroupPoint::GENERATOR);

        let mut full = ExtendedFullPoint::NEUTRAL;
        assert_eq!(
            serializer.deserialize_point(&mut out.as_slice(), TrustLevel::Untrusted, &mut full),
            Ok(len)
        );
        assert_eq!(&full, shifted);
    }

    let shifted = ExtendedFullPoint::GENERATOR + ExtendedFullPoint::A;
    assert!(shifted.is_in_good_subgroup());

    check(XYSerializer::new(), &shifted);
    check(XAndSignYSerializer::new(), &shifted);
    check(YAndSignXSerializer::new().with_endianness(ByteOrder::BigEndian), &shifted);

    // Subgroup points read back to exactly the bytes they came from.
    let g = AffineSubgroupPoint::GENERATOR;
    let mut first = Vec::new();
    XAndSignYSerializer::new().serialize_point(&mut first, &g).unwrap();
    let decoded = roundtrip(XAndSignYSerializer::new(), &g);
    let mut second = Vec::new();
    XAndSignYSerializer::new()
        .serialize_point(&mut second, &decoded)
        .unwrap();
    assert_eq!(first, second);
}

proptest! {
    #[test]
    fn full_formats_roundtrip_exactly(seed in any::<u64>(), big in any::<bool>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let order = if big { ByteOrder::BigEndian } else { ByteOrder::LittleEndian };
        let p = ExtendedFullPoint::random(&mut rng);

        assert_eq!(roundtrip(XYSerializer::new().with_endianness(order), &p), p);
        assert_eq!(roundtrip(XAndSignYSerializer::new().with_endianness(order), &p), p);
        assert_eq!(roundtrip(YAndSignXSerializer::new().with_endianness(order), &p), p);

        let q = p.to_efgh();
        assert_eq!(roundtrip(XYSerializer::new(), &q), q);
        let q = p.to_affine();
        assert_eq!(roundtrip(YAndSignXSerializer::new(), &q), q);
    }

    #[test]
    fn subgroup_formats_roundtrip(seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let p = ExtendedSubgroupPoint::random(&mut rng);

        assert_eq!(roundtrip(XTimesSignYSerializer::new(), &p), p);
        assert_eq!(roundtrip(XYTimesSignYSerializer::new(), &p), p);
        assert_eq!(roundtrip(XYSerializer::new().with_subgroup_only(true), &p), p);
        assert_eq!(roundtrip(XAndSignYSerializer::new().with_subgroup_only(true), &p), p);

        let full = p.to_full_curve();
        assert_eq!(roundtrip(XTimesSignYSerializer::new(), &full), full);
        let efgh = p.to_efgh();
        assert_eq!(roundtrip(XYTimesSignYSerializer::new(), &efgh), efgh);
    }
}
