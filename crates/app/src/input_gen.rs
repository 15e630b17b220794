//! Sample text generation for the demo command.
//!
//! When no input is given, we generate text with interesting compression
//! characteristics: a mix of skewed and near-uniform symbol distributions.
//!
//! # Design
//!
//! Generated text has:
//! - Highly compressible sections (runs of one symbol)
//! - Word-like sections over a small alphabet with spaces and punctuation
//! - Repeating phrases
//! - Near-uniform sections drawn from a wide alphabet (including non-ASCII)
//!
//! This makes the compression behavior visible in the statistics.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const LETTERS: &[char] = &[
    'e', 't', 'a', 'o', 'i', 'n', 's', 'h', 'r', 'd', 'l', 'u', 'c', 'm', 'w', 'f',
];

const WIDE: &[char] = &[
    'α', 'β', 'γ', 'δ', 'ñ', 'ü', 'ø', 'ß', '€', '£', '語', '字', '0', '1', '2', '3', '4', '5',
    '6', '7', '8', '9', '#', '@', '\t',
];

/// Generate sample text of exactly `size_symbols` symbols.
///
/// The same seed always produces the same text.
pub fn generate_sample_text(seed: u64, size_symbols: usize) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut text: Vec<char> = Vec::with_capacity(size_symbols);

    while text.len() < size_symbols {
        let section = (size_symbols - text.len()).min(512);

        match rng.gen_range(0..10) {
            // 20% runs of one symbol
            0..=1 => {
                let symbol = LETTERS[rng.gen_range(0..LETTERS.len())];
                text.extend(std::iter::repeat(symbol).take(section));
            }

            // 40% word-like text
            2..=5 => {
                for _ in 0..section {
                    let roll = rng.gen_range(0..100);
                    text.push(match roll {
                        0..=14 => ' ',
                        15 => '.',
                        16 => '\n',
                        _ => LETTERS[rng.gen_range(0..LETTERS.len())],
                    });
                }
            }

            // 20% repeating phrase
            6..=7 => {
                let phrase = generate_phrase(&mut rng);
                text.extend(phrase.iter().cycle().take(section));
            }

            // 20% near-uniform wide alphabet
            _ => {
                for _ in 0..section {
                    text.push(WIDE[rng.gen_range(0..WIDE.len())]);
                }
            }
        }
    }

    text.truncate(size_symbols);
    text.into_iter().collect()
}

/// Generate a short phrase to repeat.
fn generate_phrase(rng: &mut ChaCha8Rng) -> Vec<char> {
    let len = rng.gen_range(4..=24);
    (0..len)
        .map(|_| {
            if rng.gen_bool(0.2) {
                ' '
            } else {
                LETTERS[rng.gen_range(0..LETTERS.len())]
            }
        })
        .collect()
}
