//! RV32I base integer instructions, plus the Zicsr and Zifencei instructions
//! that live under the base SYSTEM and MISC-MEM opcodes.
use super::{Extension, ExtensionTable};
use crate::{
    bits::BitSequence,
    error::DecodeError,
    format::{
        standard::{BFields, IFields, JFields, RFields, SFields, UFields},
        Format, OpcodeKey,
    },
    instruction::Instruction,
    mnemonic::Mnemonic,
    register::Register::X,
};

pub static TABLE: ExtensionTable = ExtensionTable {
    extension: Extension::I32,
    entries: &[
        (OpcodeKey::LOAD, decode_load),
        (OpcodeKey::MISC_MEM, decode_misc_mem),
        (OpcodeKey::OP_IMM, decode_op_imm),
        (OpcodeKey::AUIPC, decode_auipc),
        (OpcodeKey::STORE, decode_store),
        (OpcodeKey::OP, decode_op),
        (OpcodeKey::LUI, decode_lui),
        (OpcodeKey::BRANCH, decode_branch),
        (OpcodeKey::JALR, decode_jalr),
        (OpcodeKey::JAL, decode_jal),
        (OpcodeKey::SYSTEM, decode_system),
    ],
    names: &[
        Mnemonic::Lui,
        Mnemonic::Auipc,
        Mnemonic::Jal,
        Mnemonic::Jalr,
        Mnemonic::Beq,
        Mnemonic::Bne,
        Mnemonic::Blt,
        Mnemonic::Bge,
        Mnemonic::Bltu,
        Mnemonic::Bgeu,
        Mnemonic::Lb,
        Mnemonic::Lh,
        Mnemonic::Lw,
        Mnemonic::Lbu,
        Mnemonic::Lhu,
        Mnemonic::Sb,
        Mnemonic::Sh,
        Mnemonic::Sw,
        Mnemonic::Addi,
        Mnemonic::Slti,
        Mnemonic::Sltiu,
        Mnemonic::Xori,
        Mnemonic::Ori,
        Mnemonic::Andi,
        Mnemonic::Slli,
        Mnemonic::Srli,
        Mnemonic::Srai,
        Mnemonic::Add,
        Mnemonic::Sub,
        Mnemonic::Sll,
        Mnemonic::Slt,
        Mnemonic::Sltu,
        Mnemonic::Xor,
        Mnemonic::Srl,
        Mnemonic::Sra,
        Mnemonic::Or,
        Mnemonic::And,
        Mnemonic::Fence,
        Mnemonic::FenceI,
        Mnemonic::Ecall,
        Mnemonic::Ebreak,
        Mnemonic::Csrrw,
        Mnemonic::Csrrs,
        Mnemonic::Csrrc,
        Mnemonic::Csrrwi,
        Mnemonic::Csrrsi,
        Mnemonic::Csrrci,
    ],
};

/// Decode LOAD instructions
///
/// Uses standard I-type format
fn decode_load(bits: &BitSequence) -> Result<Instruction, DecodeError> {
    let f = IFields::parse(bits);

    let mnemonic = match f.funct3 {
        0b000 => Mnemonic::Lb,
        0b001 => Mnemonic::Lh,
        0b010 => Mnemonic::Lw,
        0b100 => Mnemonic::Lbu,
        0b101 => Mnemonic::Lhu,
        // 0b011 (ld) and 0b110 (lwu) are RV64 only
        _ => return Err(DecodeError::unknown(bits)),
    };

    Ok(Instruction::new(mnemonic, Format::I, *bits).dest(X(f.rd)).src(X(f.rs1)).imm(f.imm))
}

/// Decode MISC-MEM instructions (fence, fence.i)
///
/// ```text
/// |  fm  | pred | succ |  rs1 | funct3 |   rd  | opcode |
/// | 31-28| 27-24| 23-20|19-15 | 14-12  | 11-7  | 6-0    |
/// ```
fn decode_misc_mem(bits: &BitSequence) -> Result<Instruction, DecodeError> {
    let f = IFields::parse(bits);

    match f.funct3 {
        0b000 => {
            let pred = bits.field(27, 24) as i32;
            let succ = bits.field(23, 20) as i32;
            Ok(Instruction::new(Mnemonic::Fence, Format::I, *bits).imm(pred).imm(succ))
        }
        0b001 => Ok(Instruction::new(Mnemonic::FenceI, Format::I, *bits)),
        _ => Err(DecodeError::unknown(bits)),
    }
}

/// Decode OP-IMM instructions
///
/// Shifts reuse the I-type immediate: shamt in bits [24:20] and a funct7 in
/// bits [31:25]. On RV32 a set shamt[5] (bit 25) is reserved.
fn decode_op_imm(bits: &BitSequence) -> Result<Instruction, DecodeError> {
    let f = IFields::parse(bits);
    let funct7 = bits.field(31, 25);
    let shamt = bits.field(24, 20) as i32;

    let (mnemonic, imm) = match (f.funct3, funct7) {
        (0b000, _) => (Mnemonic::Addi, f.imm),
        (0b010, _) => (Mnemonic::Slti, f.imm),
        (0b011, _) => (Mnemonic::Sltiu, f.imm),
        (0b100, _) => (Mnemonic::Xori, f.imm),
        (0b110, _) => (Mnemonic::Ori, f.imm),
        (0b111, _) => (Mnemonic::Andi, f.imm),
        (0b001, 0b0000000) => (Mnemonic::Slli, shamt),
        (0b101, 0b0000000) => (Mnemonic::Srli, shamt),
        (0b101, 0b0100000) => (Mnemonic::Srai, shamt),
        _ => return Err(DecodeError::unknown(bits)),
    };

    Ok(Instruction::new(mnemonic, Format::I, *bits).dest(X(f.rd)).src(X(f.rs1)).imm(imm))
}

/// Decode AUIPC
fn decode_auipc(bits: &BitSequence) -> Result<Instruction, DecodeError> {
    let f = UFields::parse(bits);
    Ok(Instruction::new(Mnemonic::Auipc, Format::U, *bits).dest(X(f.rd)).imm(f.imm))
}

/// Decode LUI
fn decode_lui(bits: &BitSequence) -> Result<Instruction, DecodeError> {
    let f = UFields::parse(bits);
    Ok(Instruction::new(Mnemonic::Lui, Format::U, *bits).dest(X(f.rd)).imm(f.imm))
}

/// Decode STORE instructions
///
/// The base register comes first among the sources, then the data register.
fn decode_store(bits: &BitSequence) -> Result<Instruction, DecodeError> {
    let f = SFields::parse(bits);

    let mnemonic = match f.funct3 {
        0b000 => Mnemonic::Sb,
        0b001 => Mnemonic::Sh,
        0b010 => Mnemonic::Sw,
        _ => return Err(DecodeError::unknown(bits)),
    };

    Ok(Instruction::new(mnemonic, Format::S, *bits).src(X(f.rs1)).src(X(f.rs2)).imm(f.imm))
}

/// Decode OP instructions with funct7 0000000 or 0100000
///
/// funct7 0000001 belongs to the M extension and is reported as an unknown
/// encoding here so the decoder can hand it to the next table.
fn decode_op(bits: &BitSequence) -> Result<Instruction, DecodeError> {
    let f = RFields::parse(bits);

    let mnemonic = match (f.funct7, f.funct3) {
        (0b0000000, 0b000) => Mnemonic::Add,
        (0b0100000, 0b000) => Mnemonic::Sub,
        (0b0000000, 0b001) => Mnemonic::Sll,
        (0b0000000, 0b010) => Mnemonic::Slt,
        (0b0000000, 0b011) => Mnemonic::Sltu,
        (0b0000000, 0b100) => Mnemonic::Xor,
        (0b0000000, 0b101) => Mnemonic::Srl,
        (0b0100000, 0b101) => Mnemonic::Sra,
        (0b0000000, 0b110) => Mnemonic::Or,
        (0b0000000, 0b111) => Mnemonic::And,
        _ => return Err(DecodeError::unknown(bits)),
    };

    Ok(Instruction::new(mnemonic, Format::R, *bits).dest(X(f.rd)).src(X(f.rs1)).src(X(f.rs2)))
}

/// Decode BRANCH instructions
fn decode_branch(bits: &BitSequence) -> Result<Instruction, DecodeError> {
    let f = BFields::parse(bits);

    let mnemonic = match f.funct3 {
        0b000 => Mnemonic::Beq,
        0b001 => Mnemonic::Bne,
        0b100 => Mnemonic::Blt,
        0b101 => Mnemonic::Bge,
        0b110 => Mnemonic::Bltu,
        0b111 => Mnemonic::Bgeu,
        _ => return Err(DecodeError::unknown(bits)),
    };

    Ok(Instruction::new(mnemonic, Format::B, *bits).src(X(f.rs1)).src(X(f.rs2)).imm(f.imm))
}

/// Decode JALR
fn decode_jalr(bits: &BitSequence) -> Result<Instruction, DecodeError> {
    let f = IFields::parse(bits);
    if f.funct3 != 0 {
        return Err(DecodeError::unknown(bits));
    }

    Ok(Instruction::new(Mnemonic::Jalr, Format::I, *bits).dest(X(f.rd)).src(X(f.rs1)).imm(f.imm))
}

/// Decode JAL
fn decode_jal(bits: &BitSequence) -> Result<Instruction, DecodeError> {
    let f = JFields::parse(bits);
    Ok(Instruction::new(Mnemonic::Jal, Format::J, *bits).dest(X(f.rd)).imm(f.imm))
}

/// Decode SYSTEM instructions
///
/// CSR instructions carry the CSR address as an unsigned immediate. The
/// immediate forms also carry the 5-bit uimm held in the rs1 field.
fn decode_system(bits: &BitSequence) -> Result<Instruction, DecodeError> {
    let f = IFields::parse(bits);
    let csr = f.raw_imm as i32;

    match f.funct3 {
        0b000 => match bits.word() {
            0x0000_0073 => Ok(Instruction::new(Mnemonic::Ecall, Format::I, *bits)),
            0x0010_0073 => Ok(Instruction::new(Mnemonic::Ebreak, Format::I, *bits)),
            // mret, wfi, sfence.vma and friends are privileged
            _ => Err(DecodeError::unknown(bits)),
        },
        0b001 | 0b010 | 0b011 => {
            let mnemonic = match f.funct3 {
                0b001 => Mnemonic::Csrrw,
                0b010 => Mnemonic::Csrrs,
                _ => Mnemonic::Csrrc,
            };
            Ok(Instruction::new(mnemonic, Format::I, *bits).dest(X(f.rd)).src(X(f.rs1)).imm(csr))
        }
        0b101 | 0b110 | 0b111 => {
            let mnemonic = match f.funct3 {
                0b101 => Mnemonic::Csrrwi,
                0b110 => Mnemonic::Csrrsi,
                _ => Mnemonic::Csrrci,
            };
            Ok(Instruction::new(mnemonic, Format::I, *bits)
                .dest(X(f.rd))
                .imm(csr)
                .imm(f.rs1 as i32))
        }
        _ => Err(DecodeError::unknown(bits)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::Register;

    fn decode(word: u32) -> Result<Instruction, DecodeError> {
        let bits = BitSequence::standard(word);
        let key = crate::format::opcode_key(&bits);
        let (_, decode) = TABLE.entries.iter().find(|(k, _)| *k == key).unwrap();
        decode(&bits)
    }

    #[test]
    fn test_decode_addi() {
        // addi x5, x10, 0
        let inst = decode(0x0005_0293).unwrap();
        assert_eq!(inst.mnemonic(), Mnemonic::Addi);
        assert_eq!(inst.dest_registers(), &[Register::X(5)]);
        assert_eq!(inst.src_registers(), &[Register::X(10)]);
        assert_eq!(inst.immediates(), &[0]);
    }

    #[test]
    fn test_decode_addi_negative() {
        // addi x1, x0, -1
        let inst = decode(0xFFF0_0093).unwrap();
        assert_eq!(inst.immediates(), &[-1]);
    }

    #[test]
    fn test_decode_shifts() {
        // srai x5, x5, 3
        let inst = decode(0x4032_D293).unwrap();
        assert_eq!(inst.mnemonic(), Mnemonic::Srai);
        assert_eq!(inst.immediates(), &[3]);

        // slli with shamt[5] set is reserved on RV32
        assert!(matches!(decode(0x0202_9293), Err(DecodeError::UnknownEncoding { .. })));
    }

    #[test]
    fn test_decode_op_rejects_m() {
        // mul x3, x1, x2 is not a base instruction
        assert!(matches!(decode(0x0220_81B3), Err(DecodeError::UnknownEncoding { .. })));
    }

    #[test]
    fn test_decode_rv64_load_is_unknown() {
        // ld x5, 0(x10)
        assert!(matches!(decode(0x0005_3283), Err(DecodeError::UnknownEncoding { .. })));
    }

    #[test]
    fn test_decode_system() {
        assert_eq!(decode(0x0000_0073).unwrap().mnemonic(), Mnemonic::Ecall);
        assert_eq!(decode(0x0010_0073).unwrap().mnemonic(), Mnemonic::Ebreak);

        // csrrs x5, mstatus(0x300), x0
        let inst = decode(0x3000_22F3).unwrap();
        assert_eq!(inst.mnemonic(), Mnemonic::Csrrs);
        assert_eq!(inst.immediates(), &[0x300]);

        // csrrwi x0, 0xfff, 31
        let inst = decode(0xFFFF_D073).unwrap();
        assert_eq!(inst.mnemonic(), Mnemonic::Csrrwi);
        assert_eq!(inst.immediates(), &[0xFFF, 31]);

        // mret
        assert!(decode(0x3020_0073).is_err());
    }

    #[test]
    fn test_names_cover_outputs() {
        for word in [0x0005_0293u32, 0x4032_D293, 0x0000_0073, 0x3000_22F3, 0x0FF0_000F] {
            let inst = decode(word).unwrap();
            assert!(TABLE.names.contains(&inst.mnemonic()), "{inst}");
        }
    }
}
