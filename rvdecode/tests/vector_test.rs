use rvdecode::{
    DecodeError, Decoder, ExtensionSet, Format, Mnemonic, OpcodeKey, Register, VectorMask,
};

const OP_V: u32 = 0b1010111;

fn decoder() -> Decoder {
    Decoder::new(ExtensionSet::rv32imvc())
}

#[test]
fn test_vector_requires_extension() {
    // VADD.VV v1, v2, v3: 0x022180d7
    let decoder = Decoder::new(ExtensionSet::rv32imc());
    assert_eq!(
        decoder.decode_hex("0x022180d7"),
        Err(DecodeError::UnsupportedOpcode(OpcodeKey::OP_V))
    );

    let decoder: Decoder = "RV32IV".parse::<ExtensionSet>().map(Decoder::new).unwrap();
    let instruction = decoder.decode_hex("0x022180d7").unwrap();
    assert_eq!(instruction.mnemonic(), Mnemonic::VaddVv);
    assert_eq!(instruction.to_string(), "vadd.vv v1,v2,v3");
}

#[test]
fn test_vadd_masked_and_unmasked() {
    let decoder = decoder();

    // vadd.vv v1, v2, v3
    let insn: u32 = (1 << 25) | (2 << 20) | (3 << 15) | (1 << 7) | OP_V;
    let instruction = decoder.decode_word(insn).unwrap();
    assert_eq!(instruction.format(), Format::V);
    assert_eq!(instruction.dest_registers(), &[Register::V(1)]);
    assert_eq!(instruction.src_registers(), &[Register::V(2), Register::V(3)]);
    assert_eq!(instruction.mask(), Some(VectorMask::Unmasked));

    // same with vm = 0
    let instruction = decoder.decode_word(insn & !(1 << 25)).unwrap();
    assert_eq!(instruction.mask(), Some(VectorMask::V0True));
    assert_eq!(instruction.to_string(), "vadd.vv v1,v2,v3,v0.t");
}

#[test]
fn test_vadd_scalar_operand() {
    // vadd.vx v1, v2, a0
    let insn: u32 = (1 << 25) | (2 << 20) | (10 << 15) | (0b100 << 12) | (1 << 7) | OP_V;
    let instruction = decoder().decode_word(insn).unwrap();
    assert_eq!(instruction.mnemonic(), Mnemonic::VaddVx);
    assert_eq!(instruction.src_registers(), &[Register::V(2), Register::X(10)]);
    assert_eq!(instruction.to_string(), "vadd.vx v1,v2,a0");
}

#[test]
fn test_vsetvli() {
    // vsetvli t0, a0, e32,m1
    let insn: u32 = (0x010 << 20) | (10 << 15) | (0b111 << 12) | (5 << 7) | OP_V;
    let instruction = decoder().decode_word(insn).unwrap();
    assert_eq!(instruction.mnemonic(), Mnemonic::Vsetvli);
    assert_eq!(instruction.mask(), None);
    assert_eq!(instruction.to_string(), "vsetvli t0,a0,16");
}

#[test]
fn test_vector_loads_and_stores() {
    let decoder = decoder();

    // vle32.v v1, (a0)
    let insn: u32 = (1 << 25) | (10 << 15) | (0b110 << 12) | (1 << 7) | 0b0000111;
    let instruction = decoder.decode_word(insn).unwrap();
    assert_eq!(instruction.mnemonic(), Mnemonic::Vle32V);
    assert_eq!(instruction.format(), Format::VL);
    assert!(!instruction.is_mem_access());

    // vse8.v v1, (a0)
    let insn: u32 = (1 << 25) | (10 << 15) | (1 << 7) | 0b0100111;
    let instruction = decoder.decode_word(insn).unwrap();
    assert_eq!(instruction.mnemonic(), Mnemonic::Vse8V);
    assert_eq!(instruction.src_registers(), &[Register::V(1), Register::X(10)]);
}

#[test]
fn test_scalar_fp_loads_are_not_vector() {
    // flw f1, 0(x2) shares LOAD-FP with the vector loads
    let flw: u32 = (2 << 15) | (0b010 << 12) | (1 << 7) | 0b0000111;
    assert!(matches!(
        decoder().decode_word(flw),
        Err(DecodeError::UnknownEncoding { key: OpcodeKey::LOAD_FP, .. })
    ));
}
