//! The decoded instruction value, its classifier predicates and text rendering.
use std::fmt;

use crate::{
    bits::BitSequence,
    format::Format,
    mnemonic::{Class, Mnemonic},
    register::{print_name, Register},
};

/// Element predication of a vector instruction
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum VectorMask {
    /// `vm = 1`, every element is active
    Unmasked,
    /// `vm = 0`, elements are predicated on `v0.t`
    V0True,
}

impl VectorMask {
    pub(crate) const fn from_vm(vm: u32) -> Self {
        if vm == 1 {
            Self::Unmasked
        } else {
            Self::V0True
        }
    }
}

/// A single decoded RISC-V instruction.
///
/// Registers are kept in the order they appear in assembly syntax. Memory
/// accesses (and `jalr`) list their base register first among the sources,
/// which is what the `offset(base)` rendering relies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    format: Format,
    src_registers: Vec<Register>,
    dest_registers: Vec<Register>,
    immediates: Vec<i32>,
    mask: Option<VectorMask>,
    mnemonic: Mnemonic,
    binary: BitSequence,
    freq: u64,
}

impl Instruction {
    pub(crate) fn new(mnemonic: Mnemonic, format: Format, binary: BitSequence) -> Self {
        Self {
            format,
            src_registers: Vec::new(),
            dest_registers: Vec::new(),
            immediates: Vec::new(),
            mask: None,
            mnemonic,
            binary,
            freq: 0,
        }
    }

    pub(crate) fn dest(mut self, reg: Register) -> Self {
        self.dest_registers.push(reg);
        self
    }

    pub(crate) fn src(mut self, reg: Register) -> Self {
        self.src_registers.push(reg);
        self
    }

    pub(crate) fn imm(mut self, imm: i32) -> Self {
        self.immediates.push(imm);
        self
    }

    pub(crate) fn masked(mut self, mask: VectorMask) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// Registers read, in encoding order
    pub fn src_registers(&self) -> &[Register] {
        &self.src_registers
    }

    /// Registers written, in encoding order
    pub fn dest_registers(&self) -> &[Register] {
        &self.dest_registers
    }

    pub fn immediates(&self) -> &[i32] {
        &self.immediates
    }

    /// Only vector instructions that support predication carry a mask
    pub fn mask(&self) -> Option<VectorMask> {
        self.mask
    }

    pub fn mnemonic(&self) -> Mnemonic {
        self.mnemonic
    }

    pub fn name(&self) -> &'static str {
        self.mnemonic.as_str()
    }

    /// Size in bits, 16 or 32
    pub fn size(&self) -> usize {
        self.binary.len()
    }

    pub fn size_in_bytes(&self) -> usize {
        self.size() / 8
    }

    /// The word this instruction was decoded from
    pub fn binary(&self) -> &BitSequence {
        &self.binary
    }

    /// Usage count attached by trace analysis, 0 unless set
    pub fn freq(&self) -> u64 {
        self.freq
    }

    pub fn set_freq(&mut self, freq: u64) {
        self.freq = freq;
    }

    pub fn is_jump(&self) -> bool {
        matches!(self.mnemonic.class(), Class::Jump | Class::JumpPcRelative)
    }

    pub fn is_jump_pc_relative(&self) -> bool {
        self.mnemonic.class() == Class::JumpPcRelative
    }

    pub fn is_branch(&self) -> bool {
        self.mnemonic.class() == Class::Branch
    }

    pub fn is_control_transfer(&self) -> bool {
        self.is_jump() || self.is_branch()
    }

    pub fn is_control_transfer_pc_relative(&self) -> bool {
        self.is_jump_pc_relative() || self.is_branch()
    }

    pub fn is_load(&self) -> bool {
        self.mnemonic.class() == Class::Load
    }

    pub fn is_store(&self) -> bool {
        self.mnemonic.class() == Class::Store
    }

    pub fn is_mem_access(&self) -> bool {
        self.is_load() || self.is_store()
    }

    /// Loads, stores and `jalr` render their first source as `offset(base)`
    fn uses_base_syntax(&self) -> bool {
        (self.is_mem_access() || self.mnemonic == Mnemonic::Jalr) && !self.src_registers.is_empty()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reg = |r: &Register| print_name(&r.to_string()).to_string();

        let (base, src) = if self.uses_base_syntax() {
            (Some(reg(&self.src_registers[0])), &self.src_registers[1..])
        } else {
            (None, &self.src_registers[..])
        };

        let mut params: Vec<String> = self.dest_registers.iter().map(reg).collect();
        params.extend(src.iter().map(reg));
        params.extend(self.immediates.iter().map(|imm| imm.to_string()));
        if let Some(VectorMask::V0True) = self.mask {
            params.push("v0.t".to_string());
        }

        let params = params.join(",");
        match base {
            Some(base) => write!(f, "{} {}({})", self.mnemonic, params, base),
            None if params.is_empty() => write!(f, "{}", self.mnemonic),
            None => write!(f, "{} {}", self.mnemonic, params),
        }
    }
}
