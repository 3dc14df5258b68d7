#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rgss_codec::{Decode, Encode, RangeCfg};
use rgss_userdata::{envelope, registry::Registry, table, Class, Userdata};

#[derive(Arbitrary, Debug)]
enum FuzzInput {
    Payload {
        class: u8,
        strict: bool,
        data: Vec<u8>,
    },
    Envelope {
        data: Vec<u8>,
    },
}

fn table_config(strict: bool) -> table::Config {
    table::Config {
        elements: RangeCfg::new(..=1 << 20),
        strict,
    }
}

fn fuzz(input: FuzzInput) {
    match input {
        FuzzInput::Payload {
            class,
            strict,
            data,
        } => {
            let class = Class::ALL[class as usize % Class::ALL.len()];
            let Ok(value) = Userdata::decode(class, &data[..], &table_config(strict)) else {
                return;
            };

            // Anything accepted must re-encode to the same bytes
            let encoded = value.encode().expect("Failed to encode a decoded value!");
            assert_eq!(&encoded[..], &data[..]);
            if let Some(size) = class.fixed_size() {
                assert_eq!(encoded.len(), size);
            }
        }
        FuzzInput::Envelope { data } => {
            let cfg = envelope::Config::default();
            let Ok(envelope) = envelope::Envelope::decode_cfg(&data[..], &cfg) else {
                return;
            };
            assert_eq!(&envelope.encode()[..], &data[..]);

            let registry = Registry::rgss_xp(table_config(false));
            let _ = registry.load_envelope(&envelope);
        }
    }
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
