//! Test-only WPX encoder.
//!
//! Produces streams in the layout the decoder reads for any configuration:
//! a greedy match finder, frequency-based literal codes and a mirrored rank
//! table for the transform variants.

#![allow(dead_code)]

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use wildbug_core::BitWriter;
use wildbug_wpx::{DecoderConfig, OffsetMode, OffsetTable, PixelLayout, RankTable, WpxFormat};

/// Explicit distances searched by the match finder.
const WINDOW: usize = 2048;

#[derive(Debug, Clone, Copy)]
enum Token {
    Literal(u8),
    Match {
        distance: usize,
        length: usize,
        context: Option<u8>,
    },
}

/// Encoder for one configuration and pixel layout.
pub struct TestEncoder {
    config: DecoderConfig,
    layout: PixelLayout,
    offsets: Option<OffsetTable>,
    find_matches: bool,
}

impl TestEncoder {
    pub fn new(format: WpxFormat, layout: PixelLayout, image: bool) -> Self {
        let config = DecoderConfig::select(format, image);
        Self {
            config,
            layout,
            offsets: config.use_context_offsets.then(|| OffsetTable::new(layout)),
            find_matches: true,
        }
    }

    /// Emit every byte after the seed as a literal.
    pub fn literals_only(mut self) -> Self {
        self.find_matches = false;
        self
    }

    pub fn encode(&self, data: &[u8]) -> Vec<u8> {
        if data.is_empty() {
            return Vec::new();
        }

        let base = self.layout.base_length;
        assert!(data.len() >= base, "data shorter than the seed");

        let tokens = self.tokenize(data);

        let mut writer = BitWriter::new();
        writer.write_bytes(&data[..base]);
        writer.write_bytes(&vec![0u8; base.next_multiple_of(4) - base]);

        let symbols = self.literal_symbols(data, &tokens);
        let codes = if self.config.use_code_table {
            let lengths = huffman_lengths(&symbols);
            let codes = canonical_codes(&lengths);
            for pair in lengths.chunks(2) {
                writer.write_byte(pair[0] | (pair[1] << 4));
            }
            writer.reseed();
            for (symbol, &length) in lengths.iter().enumerate() {
                if length != 0 {
                    writer.write_bits(u32::from(codes[symbol]), length);
                }
            }
            Some((lengths, codes))
        } else {
            writer.reseed();
            None
        };

        let mut symbols = symbols.into_iter();
        for token in tokens {
            match token {
                Token::Literal(byte) => {
                    writer.write_bit(true);
                    let symbol = symbols.next().unwrap_or(byte);
                    match &codes {
                        Some((lengths, codes)) => writer.write_bits(
                            u32::from(codes[usize::from(symbol)]),
                            lengths[usize::from(symbol)],
                        ),
                        None => writer.write_byte(byte),
                    }
                }
                Token::Match {
                    distance,
                    length,
                    context,
                } => {
                    writer.write_bit(false);
                    let baseline = self.write_offset(&mut writer, distance, context);
                    write_extension(&mut writer, (length - baseline) as u32);
                }
            }
        }

        writer.into_vec()
    }

    /// Literal symbols in token order: bytes, or ranks under the transform.
    fn literal_symbols(&self, data: &[u8], tokens: &[Token]) -> Vec<u8> {
        let base = self.layout.base_length;
        let mut ranks = RankTable::new();
        let mut symbols = Vec::new();
        let mut pos = base;

        for token in tokens {
            match *token {
                Token::Literal(byte) => {
                    if self.config.use_rank_transform {
                        let context = data[pos - base];
                        let rank = ranks.rank_of(context, byte);
                        ranks.lookup_and_promote(context, rank);
                        symbols.push(rank);
                    } else {
                        symbols.push(byte);
                    }
                    pos += 1;
                }
                Token::Match { length, .. } => pos += length,
            }
        }

        symbols
    }

    fn write_offset(&self, writer: &mut BitWriter, distance: usize, context: Option<u8>) -> usize {
        if self.offsets.is_some() {
            writer.write_bit(context.is_some());
            if let Some(index) = context {
                writer.write_bits(u32::from(index), 3);
                return self.context_baseline();
            }
        }

        let raw = distance - 1;
        match self.config.offset_mode {
            OffsetMode::OneByte => {
                writer.write_byte(raw as u8);
                2
            }
            OffsetMode::TwoByte if raw < 256 => {
                writer.write_bit(true);
                writer.write_byte(raw as u8);
                2
            }
            OffsetMode::TwoByte => {
                writer.write_bit(false);
                writer.write_bytes(&(raw as u16).to_le_bytes());
                3
            }
        }
    }

    fn context_baseline(&self) -> usize {
        if self.layout.base_length != 1 { 1 } else { 2 }
    }

    fn explicit_baseline(&self, distance: usize) -> Option<usize> {
        match self.config.offset_mode {
            OffsetMode::OneByte if distance <= 256 => Some(2),
            OffsetMode::OneByte => None,
            OffsetMode::TwoByte if distance <= 256 => Some(2),
            OffsetMode::TwoByte if distance <= 65536 => Some(3),
            OffsetMode::TwoByte => None,
        }
    }

    fn tokenize(&self, data: &[u8]) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut pos = self.layout.base_length;

        while pos < data.len() {
            let best = if self.find_matches {
                self.find_match(data, pos)
            } else {
                None
            };

            match best {
                Some(token @ Token::Match { length, .. }) => {
                    tokens.push(token);
                    pos += length;
                }
                _ => {
                    tokens.push(Token::Literal(data[pos]));
                    pos += 1;
                }
            }
        }

        tokens
    }

    fn find_match(&self, data: &[u8], pos: usize) -> Option<Token> {
        let mut best: Option<(usize, usize, Option<u8>)> = None;
        let mut consider = |distance: usize, baseline: usize, context: Option<u8>| {
            if distance == 0 || distance > pos {
                return;
            }
            let length = match_length(data, pos, distance);
            if length >= baseline && best.is_none_or(|(_, best_len, _)| length > best_len) {
                best = Some((distance, length, context));
            }
        };

        if let Some(offsets) = &self.offsets {
            let baseline = self.context_baseline();
            for (index, &distance) in offsets.distances().iter().enumerate() {
                consider(distance, baseline, Some(index as u8));
            }
        }

        for distance in 1..=WINDOW.min(pos) {
            if let Some(baseline) = self.explicit_baseline(distance) {
                consider(distance, baseline, None);
            }
        }

        best.map(|(distance, length, context)| Token::Match {
            distance,
            length,
            context,
        })
    }
}

fn match_length(data: &[u8], pos: usize, distance: usize) -> usize {
    data[pos..]
        .iter()
        .zip(&data[pos - distance..])
        .take_while(|(a, b)| a == b)
        .count()
}

/// Encode a length extension: `1` for none, else `0` and the coded value.
pub fn write_extension(writer: &mut BitWriter, n: u32) {
    if n == 0 {
        writer.write_bit(true);
        return;
    }
    writer.write_bit(false);

    let value = n + 1;
    let payload_bits = 31 - value.leading_zeros();
    for _ in 1..payload_bits {
        writer.write_bit(false);
    }
    writer.write_bit(true);
    writer.write_bits(value, payload_bits as u8);
}

/// Huffman code lengths for the symbol frequencies, limited to 15 bits.
pub fn huffman_lengths(symbols: &[u8]) -> [u8; 256] {
    let mut freqs = [0u64; 256];
    for &symbol in symbols {
        freqs[usize::from(symbol)] += 1;
    }

    let mut lengths = [0u8; 256];
    let used: Vec<usize> = (0..256).filter(|&s| freqs[s] > 0).collect();
    match used.len() {
        0 => return lengths,
        1 => {
            lengths[used[0]] = 1;
            return lengths;
        }
        _ => {}
    }

    let mut parent = vec![usize::MAX; used.len()];
    let mut heap: BinaryHeap<Reverse<(u64, usize)>> = used
        .iter()
        .enumerate()
        .map(|(node, &symbol)| Reverse((freqs[symbol], node)))
        .collect();

    while let (Some(Reverse((fa, a))), Some(Reverse((fb, b)))) = (heap.pop(), heap.pop()) {
        let node = parent.len();
        parent.push(usize::MAX);
        parent[a] = node;
        parent[b] = node;
        heap.push(Reverse((fa + fb, node)));
    }

    for (leaf, &symbol) in used.iter().enumerate() {
        let mut depth = 0u8;
        let mut node = leaf;
        while parent[node] != usize::MAX {
            node = parent[node];
            depth += 1;
        }
        lengths[symbol] = depth;
    }

    if lengths.iter().any(|&length| length > 15) {
        for &symbol in &used {
            lengths[symbol] = 8;
        }
    }

    lengths
}

/// Canonical codes for a length table, in symbol order within each length.
pub fn canonical_codes(lengths: &[u8; 256]) -> [u16; 256] {
    let mut bl_count = [0u16; 16];
    for &length in lengths {
        if length != 0 {
            bl_count[usize::from(length)] += 1;
        }
    }

    let mut next_code = [0u16; 16];
    let mut code = 0u16;
    for bits in 1..16 {
        code = (code + bl_count[bits - 1]) << 1;
        next_code[bits] = code;
    }

    let mut codes = [0u16; 256];
    for (symbol, &length) in lengths.iter().enumerate() {
        if length != 0 {
            codes[symbol] = next_code[usize::from(length)];
            next_code[usize::from(length)] += 1;
        }
    }
    codes
}

/// Repetitive text.
pub fn text_data(size: usize) -> Vec<u8> {
    b"The WildBug engine packs its resources into WPX containers. "
        .iter()
        .copied()
        .cycle()
        .take(size)
        .collect()
}

/// Pseudo-random bytes from a fixed LCG seed.
pub fn random_data(size: usize, seed: u64) -> Vec<u8> {
    let mut state = seed;
    (0..size)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (state >> 33) as u8
        })
        .collect()
}

/// A synthetic image: smooth gradients with a repeating stripe, so rows
/// resemble the row above and pixels resemble their neighbours.
pub fn image_data(layout: PixelLayout, rows: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(layout.stride * rows);
    for y in 0..rows {
        for x in 0..layout.stride {
            let channel = x % layout.base_length;
            let pixel = x / layout.base_length;
            let value = if (pixel / 5 + y / 3) % 4 == 0 {
                0xFF
            } else {
                (pixel * 3 + y * 2 + channel * 40) as u8
            };
            data.push(value);
        }
    }
    data
}
