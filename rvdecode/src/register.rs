//! Register identifiers and ABI names.
use std::fmt;

/// A register operand of a decoded instruction
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Register {
    /// Integer register x0-x31
    X(u8),
    /// Floating-point register f0-f31
    F(u8),
    /// Vector register v0-v31
    V(u8),
}

impl Register {
    pub const ZERO: Self = Self::X(0);
    pub const RA: Self = Self::X(1);
    pub const SP: Self = Self::X(2);

    /// ABI name of an integer register, `None` for other register files
    pub const fn abi_name(&self) -> Option<&'static str> {
        match self {
            Self::X(id) => xreg_abi_name(*id),
            Self::F(_) | Self::V(_) => None,
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X(id) => write!(f, "x{id}"),
            Self::F(id) => write!(f, "f{id}"),
            Self::V(id) => write!(f, "v{id}"),
        }
    }
}

const fn xreg_abi_name(id: u8) -> Option<&'static str> {
    let name = match id {
        0 => "zero",
        1 => "ra",
        2 => "sp",
        3 => "gp",
        4 => "tp",
        5 => "t0",
        6 => "t1",
        7 => "t2",
        8 => "s0",
        9 => "s1",
        10 => "a0",
        11 => "a1",
        12 => "a2",
        13 => "a3",
        14 => "a4",
        15 => "a5",
        16 => "a6",
        17 => "a7",
        18 => "s2",
        19 => "s3",
        20 => "s4",
        21 => "s5",
        22 => "s6",
        23 => "s7",
        24 => "s8",
        25 => "s9",
        26 => "s10",
        27 => "s11",
        28 => "t3",
        29 => "t4",
        30 => "t5",
        31 => "t6",
        _ => return None,
    };
    Some(name)
}

/// Map a register id such as `"x10"` to its ABI name (`"a0"`).
///
/// Anything that is not `x0`..`x31` is returned unchanged, which covers
/// floating-point and vector registers as well as names that are already ABI names.
pub fn print_name(register: &str) -> &str {
    let id = register
        .strip_prefix('x')
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .filter(|digits| digits.len() == 1 || !digits.starts_with('0'))
        .and_then(|digits| digits.parse::<u8>().ok());

    match id.and_then(xreg_abi_name) {
        Some(name) => name,
        None => register,
    }
}
