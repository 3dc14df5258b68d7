#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rgss_codec::{Decode, Encode, EncodeSize};
use rgss_userdata::{envelope::Envelope, table, Color, Table, Tone, Userdata};

const MAX_ELEMENTS: usize = 100_000;

#[derive(Arbitrary, Debug)]
enum FuzzInput {
    Color([u64; 4]),
    Tone([u64; 4]),
    Table {
        dimensions: u32,
        xsize: u32,
        ysize: u32,
        zsize: u32,
        elements: Vec<i16>,
    },
}

fn build(input: FuzzInput) -> Userdata {
    match input {
        FuzzInput::Color(bits) => Color::from(bits.map(f64::from_bits)).into(),
        FuzzInput::Tone(bits) => Tone::from(bits.map(f64::from_bits)).into(),
        FuzzInput::Table {
            dimensions,
            xsize,
            ysize,
            zsize,
            mut elements,
        } => {
            elements.truncate(MAX_ELEMENTS);
            Table::from_parts(dimensions, xsize, ysize, zsize, elements)
                .expect("Failed to build a table within capacity!")
                .into()
        }
    }
}

/// Compares values bit for bit so NaN components are handled.
fn same(a: &Userdata, b: &Userdata) -> bool {
    match (a, b) {
        (Userdata::Color(a), Userdata::Color(b)) => a.to_bits() == b.to_bits(),
        (Userdata::Tone(a), Userdata::Tone(b)) => a.to_bits() == b.to_bits(),
        (Userdata::Table(a), Userdata::Table(b)) => a == b,
        _ => false,
    }
}

fn fuzz(input: FuzzInput) {
    let value = build(input);
    let cfg = table::Config::default();

    let payload = value.encode().expect("Failed to encode!");
    let decoded = Userdata::decode(value.class(), payload.clone(), &cfg)
        .expect("Failed to decode a successfully encoded input!");
    assert!(same(&value, &decoded));

    let envelope = Envelope::pack(&value).expect("Failed to pack!");
    let encoded = envelope.encode();
    assert_eq!(envelope.encode_size(), encoded.len());
    let unpacked = Envelope::decode_cfg(encoded, &Default::default())
        .expect("Failed to decode a successfully encoded envelope!");
    assert_eq!(unpacked.data(), &payload);
    let reloaded = unpacked.unpack(&cfg).expect("Failed to unpack!");
    assert!(same(&value, &reloaded));
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
