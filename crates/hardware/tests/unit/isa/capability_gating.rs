//! Capability, Revision, and Mode Gating.
//!
//! The same word must decode, fail as reserved, or fail as unavailable
//! depending only on the capability set. These tests pin the gate order
//! (removal outranks the base-revision bit) and the resolution of the
//! DSP/Loongson encoding collision.

use mipsim_core::CapabilitySet;
use mipsim_core::common::error::DecodeFault;
use mipsim_core::decode;
use mipsim_core::isa::caps::ase;
use mipsim_core::isa::operation::OpKind;
use rstest::rstest;

use crate::common::{i_type, j_type, r_type};

#[rstest]
#[case::beql(i_type(0x14, 3, 4, 16))]
#[case::bltzall(i_type(0x01, 3, 0x12, 16))]
#[case::lwl(i_type(0x22, 3, 4, 0))]
#[case::ll(i_type(0x30, 3, 4, 0))]
#[case::madd(r_type(0x1C, 3, 4, 0, 0, 0x00))]
#[case::clz(r_type(0x1C, 3, 0, 5, 0, 0x20))]
#[case::addi(i_type(0x08, 3, 4, 1))]
fn release_six_removes_legacy_encodings(#[case] word: u32) {
    assert!(
        decode(word, &CapabilitySet::mips32r2()).is_ok(),
        "{word:#010x} is legal before Release 6"
    );
    assert_eq!(
        decode(word, &CapabilitySet::mips32r6()),
        Err(DecodeFault::Reserved { word }),
        "{word:#010x} was reclaimed by Release 6"
    );
}

#[test]
fn removal_outranks_the_base_revision_bit() {
    // BEQL needs MIPS II, which an R6 core still carries; the removal must
    // win over that satisfied requirement.
    let word = i_type(0x14, 3, 4, 16);
    let caps = CapabilitySet::mips32r6();
    assert!(caps.has_isa(mipsim_core::isa::caps::isa::MIPS2));
    assert_eq!(decode(word, &caps), Err(DecodeFault::Reserved { word }));
}

#[rstest]
#[case::rotr(r_type(0x00, 1, 4, 5, 3, 0x02))]
#[case::ext(r_type(0x1F, 3, 4, 7, 8, 0x00))]
#[case::ins(r_type(0x1F, 3, 4, 15, 8, 0x04))]
#[case::seb(r_type(0x1F, 0, 4, 5, 0x10, 0x20))]
#[case::wsbh(r_type(0x1F, 0, 4, 5, 0x02, 0x20))]
fn release_two_encodings_are_reserved_on_release_one(#[case] word: u32) {
    assert_eq!(
        decode(word, &CapabilitySet::mips32()),
        Err(DecodeFault::Reserved { word })
    );
    assert!(decode(word, &CapabilitySet::mips32r2()).is_ok());
}

#[rstest]
#[case::daddu(r_type(0x00, 3, 4, 5, 0, 0x2D))]
#[case::dsll(r_type(0x00, 0, 4, 5, 3, 0x38))]
#[case::daddiu(i_type(0x19, 3, 4, 1))]
#[case::ld(i_type(0x37, 3, 4, 0))]
#[case::sd(i_type(0x3F, 3, 4, 0))]
#[case::dclz(r_type(0x1C, 3, 0, 5, 0, 0x24))]
fn doubleword_encodings_need_sixty_four_bit_mode(#[case] word: u32) {
    assert!(decode(word, &CapabilitySet::mips64()).is_ok());
    assert_eq!(
        decode(word, &CapabilitySet::mips64().in_32bit_mode()),
        Err(DecodeFault::Reserved { word }),
        "64-bit core with 64-bit mode off must reject {word:#010x}"
    );
    assert_eq!(
        decode(word, &CapabilitySet::mips32()),
        Err(DecodeFault::Reserved { word })
    );
}

#[test]
fn cop1_group_is_unavailable_without_the_fpu() {
    let word = r_type(0x11, 0x10, 7, 8, 9, 0x00);
    assert_eq!(
        decode(word, &CapabilitySet::mips32r2()),
        Err(DecodeFault::Unavailable { word }),
        "a disabled coprocessor is unavailable, not reserved, so guest \
         kernels can emulate it"
    );
    assert!(decode(word, &CapabilitySet::mips32r2().with_ase(ase::CP1)).is_ok());
}

#[test]
fn paired_single_needs_mips_five() {
    let word = r_type(0x11, 0x16, 7, 8, 9, 0x00);
    let r2 = CapabilitySet::mips32r2().with_ase(ase::CP1);
    assert_eq!(decode(word, &r2), Err(DecodeFault::Reserved { word }));
    assert!(decode(word, &CapabilitySet::mips64r2().with_ase(ase::CP1)).is_ok());
}

#[test]
fn dsp_loongson_collision_resolves_by_extension() {
    let word = r_type(0x1F, 3, 4, 5, 0, 0x18);

    let plain = CapabilitySet::mips32r2();
    assert_eq!(
        decode(word, &plain),
        Err(DecodeFault::Unavailable { word }),
        "meaningful only under an extension this core lacks"
    );

    let dsp = plain.with_ase(ase::DSP_R2);
    assert_eq!(decode(word, &dsp).map(|op| op.kind), Ok(OpKind::AdduhQb));

    let loongson = plain.with_ase(ase::LOONGSON_2E);
    assert_eq!(decode(word, &loongson).map(|op| op.kind), Ok(OpKind::MultG));
}

#[test]
fn dsp_wins_the_collision_when_both_extensions_are_present() {
    let word = r_type(0x1F, 3, 4, 5, 0, 0x18);
    let both = CapabilitySet::mips32r2().with_ase(ase::DSP_R2 | ase::LOONGSON_2E);
    assert_eq!(decode(word, &both).map(|op| op.kind), Ok(OpKind::AdduhQb));
}

#[test]
fn branch_likely_needs_mips_two() {
    // A bare MIPS I core: strip the MIPS II bit from the r1 profile.
    let mips1 = CapabilitySet {
        isa: mipsim_core::isa::caps::isa::MIPS1,
        ase: 0,
        mode64: false,
    };
    let word = i_type(0x14, 3, 4, 16);
    assert_eq!(decode(word, &mips1), Err(DecodeFault::Reserved { word }));
}

#[test]
fn unassigned_major_opcode_is_reserved() {
    // Major 0x12 (COP2) is outside this decoder's table.
    let word = j_type(0x12, 0);
    assert_eq!(
        decode(word, &CapabilitySet::mips64r2()),
        Err(DecodeFault::Reserved { word })
    );
}
