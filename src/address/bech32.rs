//! BIP-173 bech32 encoding as used by Cosmos account addresses

const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";
const GENERATOR: [u32; 5] = [0x3b6a57b2, 0x26508e6d, 0x1ea119fa, 0x3d4233dd, 0x2a1462b3];
const CHECKSUM_LEN: usize = 6;

/// Cosmos relaxes the 90 character BIP-173 limit for long contract addresses
pub const MAX_BECH32_LEN: usize = 1023;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bech32Error {
    InvalidLength(usize),
    MixedCase,
    MissingSeparator,
    InvalidChar(char),
    InvalidChecksum,
    InvalidPadding,
}

impl std::fmt::Display for Bech32Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bech32Error::InvalidLength(len) => write!(f, "invalid length {len}"),
            Bech32Error::MixedCase => write!(f, "mixed case"),
            Bech32Error::MissingSeparator => write!(f, "missing separator '1'"),
            Bech32Error::InvalidChar(c) => write!(f, "invalid character {c:?}"),
            Bech32Error::InvalidChecksum => write!(f, "invalid checksum"),
            Bech32Error::InvalidPadding => write!(f, "invalid padding"),
        }
    }
}

fn polymod(values: &[u8]) -> u32 {
    let mut chk: u32 = 1;
    for value in values {
        let top = chk >> 25;
        chk = ((chk & 0x01ff_ffff) << 5) ^ u32::from(*value);
        for (i, generator) in GENERATOR.iter().enumerate() {
            if (top >> i) & 1 == 1 {
                chk ^= generator;
            }
        }
    }
    chk
}

fn hrp_expand(hrp: &[u8]) -> Vec<u8> {
    let mut expanded: Vec<u8> = hrp.iter().map(|b| b >> 5).collect();
    expanded.push(0);
    expanded.extend(hrp.iter().map(|b| b & 0x1f));
    expanded
}

fn create_checksum(hrp: &[u8], data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut values = hrp_expand(hrp);
    values.extend_from_slice(data);
    values.extend_from_slice(&[0; CHECKSUM_LEN]);
    let modulus = polymod(&values) ^ 1;

    let mut checksum = [0u8; CHECKSUM_LEN];
    for (i, slot) in checksum.iter_mut().enumerate() {
        *slot = ((modulus >> (5 * (5 - i))) & 0x1f) as u8;
    }
    checksum
}

/// Regroup bits, e.g. 8-bit bytes into 5-bit groups and back
pub fn convert_bits(data: &[u8], from: u32, to: u32, pad: bool) -> Result<Vec<u8>, Bech32Error> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let max_value: u32 = (1 << to) - 1;
    let max_acc: u32 = (1 << (from + to - 1)) - 1;
    let mut out = Vec::with_capacity(data.len() * from as usize / to as usize + 1);

    for value in data {
        let value = u32::from(*value);
        if value >> from != 0 {
            return Err(Bech32Error::InvalidPadding);
        }
        acc = ((acc << from) | value) & max_acc;
        bits += from;
        while bits >= to {
            bits -= to;
            out.push(((acc >> bits) & max_value) as u8);
        }
    }

    if pad {
        if bits > 0 {
            out.push(((acc << (to - bits)) & max_value) as u8);
        }
    } else if bits >= from || ((acc << (to - bits)) & max_value) != 0 {
        return Err(Bech32Error::InvalidPadding);
    }
    Ok(out)
}

/// Decode a bech32 string into its human-readable part and 8-bit payload
pub fn decode(s: &str) -> Result<(String, Vec<u8>), Bech32Error> {
    if s.len() > MAX_BECH32_LEN || s.len() < CHECKSUM_LEN + 2 {
        return Err(Bech32Error::InvalidLength(s.len()));
    }
    let has_lower = s.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = s.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(Bech32Error::MixedCase);
    }
    let s = s.to_ascii_lowercase();

    let separator = s.rfind('1').ok_or(Bech32Error::MissingSeparator)?;
    if separator == 0 || separator + CHECKSUM_LEN + 1 > s.len() {
        return Err(Bech32Error::MissingSeparator);
    }
    let (hrp, data_part) = (&s[..separator], &s[separator + 1..]);

    if let Some(c) = hrp.chars().find(|c| !(33..=126).contains(&(*c as u32))) {
        return Err(Bech32Error::InvalidChar(c));
    }

    let data = data_part
        .chars()
        .map(|c| {
            CHARSET
                .iter()
                .position(|&b| b as char == c)
                .map(|p| p as u8)
                .ok_or(Bech32Error::InvalidChar(c))
        })
        .collect::<Result<Vec<u8>, _>>()?;

    let mut values = hrp_expand(hrp.as_bytes());
    values.extend_from_slice(&data);
    if polymod(&values) != 1 {
        return Err(Bech32Error::InvalidChecksum);
    }

    let payload = convert_bits(&data[..data.len() - CHECKSUM_LEN], 5, 8, false)?;
    Ok((hrp.to_string(), payload))
}

/// Encode an 8-bit payload under the given human-readable part
pub fn encode(hrp: &str, payload: &[u8]) -> Result<String, Bech32Error> {
    let hrp = hrp.to_ascii_lowercase();
    let data = convert_bits(payload, 8, 5, true)?;
    let checksum = create_checksum(hrp.as_bytes(), &data);

    let mut encoded = String::with_capacity(hrp.len() + 1 + data.len() + CHECKSUM_LEN);
    encoded.push_str(&hrp);
    encoded.push('1');
    for group in data.iter().chain(checksum.iter()) {
        encoded.push(CHARSET[*group as usize] as char);
    }
    if encoded.len() > MAX_BECH32_LEN {
        return Err(Bech32Error::InvalidLength(encoded.len()));
    }
    Ok(encoded)
}
