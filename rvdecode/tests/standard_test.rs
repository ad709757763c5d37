use rvdecode::{
    BitSequence, DecodeError, Decoder, ExtensionSet, Format, Mnemonic, OpcodeKey, Register,
};

fn rv32im() -> Decoder {
    Decoder::new(ExtensionSet::rv32im())
}

#[test]
fn test_decode_hex_addi_end_to_end() {
    let decoder = Decoder::from_isa("32I").unwrap();
    let inst = decoder.decode_hex("0x00050293").unwrap();

    assert_eq!(inst.name(), "addi");
    assert_eq!(inst.format(), Format::I);
    assert_eq!(inst.format().to_string(), "I");
    assert_eq!(inst.dest_registers(), &[Register::X(5)]);
    assert_eq!(inst.src_registers(), &[Register::X(10)]);
    assert_eq!(inst.immediates(), &[0]);
    assert_eq!(inst.size(), 32);
    assert_eq!(inst.size_in_bytes(), 4);
    assert!(inst.to_string().starts_with("addi "));
    assert_eq!(inst.to_string(), "addi t0,a0,0");
}

#[test]
fn test_i_immediate_all_ones_is_minus_one() {
    // ADDI x1, x0, -1
    let bits: u32 =
        (0b1111_1111_1111 << 20) | // imm[11:0]
        (0 << 15) |                // rs1 = x0
        (0b000 << 12) |            // funct3 = ADDI
        (1 << 7) |                 // rd = x1
        0b0010011;                 // opcode = OP-IMM

    let inst = rv32im().decode(&BitSequence::standard(bits)).unwrap();
    assert_eq!(inst.immediates(), &[-1]);
    assert_eq!(inst.to_string(), "addi ra,zero,-1");
}

#[test]
fn test_slli_invalid_upper_bits_rv32() {
    // SLLI x1, x2, 1 with invalid upper bits (funct7 = 0b001_0000 instead of 0b000_0000)
    let invalid_bits: u32 =
        (0b001_0000 << 25) |  // imm[11:5] - invalid (should be 0)
        (1 << 20) |           // shamt = 1
        (2 << 15) |           // rs1 = x2
        (0b001 << 12) |       // funct3 = SLLI
        (1 << 7) |            // rd = x1
        0b0010011;            // opcode = OP-IMM

    let result = rv32im().decode(&BitSequence::standard(invalid_bits));
    assert!(matches!(result, Err(DecodeError::UnknownEncoding { key: OpcodeKey::OP_IMM, .. })));
}

#[test]
fn test_slli_valid_upper_bits_rv32() {
    // Valid SLLI x1, x2, 5
    let valid_bits: u32 =
        (5 << 20) |           // shamt = 5
        (2 << 15) |           // rs1 = x2
        (0b001 << 12) |       // funct3 = SLLI
        (1 << 7) |            // rd = x1
        0b0010011;            // opcode = OP-IMM

    let inst = rv32im().decode(&BitSequence::standard(valid_bits)).unwrap();
    assert_eq!(inst.mnemonic(), Mnemonic::Slli);
    assert_eq!(inst.dest_registers(), &[Register::X(1)]);
    assert_eq!(inst.src_registers(), &[Register::X(2)]);
    assert_eq!(inst.immediates(), &[5]);
}

#[test]
fn test_beq_classification() {
    // BEQ x1, x2, -8
    let inst = rv32im().decode_hex("fe208ce3").unwrap();
    assert_eq!(inst.mnemonic(), Mnemonic::Beq);
    assert_eq!(inst.format(), Format::B);
    assert_eq!(inst.immediates(), &[-8]);
    assert!(inst.is_branch());
    assert!(inst.is_control_transfer());
    assert!(inst.is_control_transfer_pc_relative());
    assert!(!inst.is_jump());
    assert!(!inst.is_mem_access());
    assert_eq!(inst.to_string(), "beq ra,sp,-8");
}

#[test]
fn test_branch_family() {
    let decoder = rv32im();
    let expected = [
        (0b000, Mnemonic::Beq),
        (0b001, Mnemonic::Bne),
        (0b100, Mnemonic::Blt),
        (0b101, Mnemonic::Bge),
        (0b110, Mnemonic::Bltu),
        (0b111, Mnemonic::Bgeu),
    ];
    for (funct3, mnemonic) in expected {
        let bits: u32 = (2 << 20) | (1 << 15) | (funct3 << 12) | (0b0100 << 8) | 0b1100011;
        let inst = decoder.decode(&BitSequence::standard(bits)).unwrap();
        assert_eq!(inst.mnemonic(), mnemonic);
        assert_eq!(inst.immediates(), &[8]);
    }

    // funct3 = 010 and 011 are reserved
    let bits: u32 = (0b010 << 12) | 0b1100011;
    assert!(decoder.decode(&BitSequence::standard(bits)).is_err());
}

#[test]
fn test_jal_and_jalr() {
    let decoder = rv32im();

    // JAL x1, 2048
    let inst = decoder.decode_hex("0x001000ef").unwrap();
    assert_eq!(inst.mnemonic(), Mnemonic::Jal);
    assert_eq!(inst.format(), Format::J);
    assert_eq!(inst.immediates(), &[2048]);
    assert!(inst.is_jump());
    assert!(inst.is_jump_pc_relative());
    assert_eq!(inst.to_string(), "jal ra,2048");

    // JAL x0, -4
    let inst = decoder.decode_hex("0xffdff06f").unwrap();
    assert_eq!(inst.immediates(), &[-4]);

    // JALR x1, 0(x6)
    let bits: u32 = (6 << 15) | (1 << 7) | 0b1100111;
    let inst = decoder.decode(&BitSequence::standard(bits)).unwrap();
    assert_eq!(inst.mnemonic(), Mnemonic::Jalr);
    assert!(inst.is_jump());
    assert!(!inst.is_jump_pc_relative());
    assert_eq!(inst.to_string(), "jalr ra,0(t1)");
}

#[test]
fn test_loads_and_stores() {
    let decoder = rv32im();

    // LW x10, -4(x2)
    let bits: u32 = (0xFFC << 20) | (2 << 15) | (0b010 << 12) | (10 << 7) | 0b0000011;
    let inst = decoder.decode(&BitSequence::standard(bits)).unwrap();
    assert_eq!(inst.mnemonic(), Mnemonic::Lw);
    assert!(inst.is_load());
    assert_eq!(inst.to_string(), "lw a0,-4(sp)");

    // LBU x5, 7(x8)
    let bits: u32 = (7 << 20) | (8 << 15) | (0b100 << 12) | (5 << 7) | 0b0000011;
    assert_eq!(decoder.decode(&BitSequence::standard(bits)).unwrap().to_string(), "lbu t0,7(s0)");

    // SW x2, -4(x1)
    let inst = decoder.decode_hex("0xfe20ae23").unwrap();
    assert_eq!(inst.mnemonic(), Mnemonic::Sw);
    assert_eq!(inst.format(), Format::S);
    assert!(inst.is_store());
    assert!(inst.is_mem_access());
    assert_eq!(inst.src_registers(), &[Register::X(1), Register::X(2)]);
    assert_eq!(inst.to_string(), "sw sp,-4(ra)");
}

#[test]
fn test_upper_immediates() {
    let decoder = rv32im();

    // LUI x5, 0x12345
    let inst = decoder.decode_hex("123452b7").unwrap();
    assert_eq!(inst.mnemonic(), Mnemonic::Lui);
    assert_eq!(inst.format(), Format::U);
    assert_eq!(inst.immediates(), &[0x1234_5000]);

    // AUIPC x1, 0xfffff
    let inst = decoder.decode_hex("fffff097").unwrap();
    assert_eq!(inst.mnemonic(), Mnemonic::Auipc);
    assert_eq!(inst.immediates(), &[-4096]);
}

#[test]
fn test_register_register_ops() {
    let decoder = rv32im();

    // SUB x3, x1, x2
    let inst = decoder.decode_hex("402081b3").unwrap();
    assert_eq!(inst.mnemonic(), Mnemonic::Sub);
    assert_eq!(inst.format(), Format::R);
    assert_eq!(inst.to_string(), "sub gp,ra,sp");

    // SRA x3, x1, x2
    assert_eq!(decoder.decode_hex("4020d1b3").unwrap().mnemonic(), Mnemonic::Sra);
}

#[test]
fn test_m_extension() {
    // MULHU x18, x19, x20 (funct7 = 0000001, funct3 = 011)
    let bits: u32 =
        (0b0000001 << 25) | (20 << 20) | (19 << 15) | (0b011 << 12) | (18 << 7) | 0b0110011;
    let inst = rv32im().decode(&BitSequence::standard(bits)).unwrap();
    assert_eq!(inst.mnemonic(), Mnemonic::Mulhu);
    assert_eq!(inst.to_string(), "mulhu s2,s3,s4");

    // Without M the same word is an unknown OP encoding
    let base = Decoder::new(ExtensionSet::rv32i());
    assert!(matches!(
        base.decode(&BitSequence::standard(bits)),
        Err(DecodeError::UnknownEncoding { key: OpcodeKey::OP, .. })
    ));
}

#[test]
fn test_system_and_fence() {
    let decoder = rv32im();
    assert_eq!(decoder.decode_hex("00000073").unwrap().to_string(), "ecall");
    assert_eq!(decoder.decode_hex("00100073").unwrap().to_string(), "ebreak");

    // CSRRW x5, 0x300, x6
    let bits: u32 = (0x300 << 20) | (6 << 15) | (0b001 << 12) | (5 << 7) | 0b1110011;
    let inst = decoder.decode(&BitSequence::standard(bits)).unwrap();
    assert_eq!(inst.mnemonic(), Mnemonic::Csrrw);
    assert_eq!(inst.to_string(), "csrrw t0,t1,768");

    // FENCE iorw, iorw
    let inst = decoder.decode_hex("0ff0000f").unwrap();
    assert_eq!(inst.mnemonic(), Mnemonic::Fence);
    assert_eq!(inst.immediates(), &[0b1111, 0b1111]);

    // FENCE.I
    assert_eq!(decoder.decode_hex("0000100f").unwrap().mnemonic(), Mnemonic::FenceI);
}

#[test]
fn test_unsupported_opcodes() {
    let decoder = rv32im();

    // OP-32 (addw) is RV64 only and has no table entry
    let bits: u32 = (2 << 20) | (1 << 15) | (3 << 7) | 0b0111011;
    assert_eq!(
        decoder.decode(&BitSequence::standard(bits)),
        Err(DecodeError::UnsupportedOpcode(OpcodeKey::Standard(0b0111011)))
    );

    // AMO is not supported
    let bits: u32 = (0b00010 << 27) | (1 << 15) | (0b010 << 12) | (3 << 7) | 0b0101111;
    assert!(matches!(
        decoder.decode(&BitSequence::standard(bits)),
        Err(DecodeError::UnsupportedOpcode(_))
    ));
}

#[test]
fn test_binary_is_preserved() {
    let decoder = rv32im();
    for hex in ["00050293", "fe208ce3", "001000ef", "402081b3", "0ff0000f"] {
        let bits = BitSequence::from_hex(hex).unwrap();
        let inst = decoder.decode(&bits).unwrap();
        assert_eq!(inst.binary(), &bits);
        assert_eq!(inst.size(), bits.len());
    }
}
