use rayon::prelude::*;

use crate::compression::BYTE_ALPHABET;

/// Returns how often each byte value occurs in the input. Uses parallelism when data set is over 64k.
pub fn freqs(data: &[u8]) -> Vec<u64> {
    if data.len() > 64_000 {
        // 16k is pretty much the sweet spot for chunk size.
        data.par_chunks(16_000)
            .fold(
                || vec![0_u64; BYTE_ALPHABET],
                |mut freqs, chunk| {
                    chunk.iter().for_each(|&el| freqs[el as usize] += 1);
                    freqs
                },
            )
            .reduce(
                || vec![0_u64; BYTE_ALPHABET],
                |mut sum, part| {
                    sum.iter_mut().zip(&part).for_each(|(s, p)| *s += p);
                    sum
                },
            )
    } else {
        let mut freqs = vec![0_u64; BYTE_ALPHABET];
        data.iter().for_each(|&el| freqs[el as usize] += 1);
        freqs
    }
}
