//! Bitfield, Byte-Manipulation, and Conditional-Move Dispatch.
//!
//! Release 2 EXT/INS with their invalid-range execute-time fault, the
//! BSHFL family, count-leading, conditional moves, and the two sides of
//! the DSP/Loongson encoding collision.

use mipsim_core::common::error::RuntimeFault;
use mipsim_core::isa::caps::ase;
use mipsim_core::{CapabilitySet, ExecutionContext, decode, execute};

use crate::common::r_type;

fn run_with(word: u32, caps: &CapabilitySet, ctx: &mut ExecutionContext) {
    let op = decode(word, caps)
        .unwrap_or_else(|e| panic!("word {word:#010x} should decode: {e}"));
    execute(&op, ctx).unwrap_or_else(|e| panic!("word {word:#010x} should not fault: {e}"));
}

fn run32(word: u32, ctx: &mut ExecutionContext) {
    run_with(word, &CapabilitySet::mips32r2(), ctx);
}

#[test]
fn ext_pulls_a_field_into_the_low_bits() {
    let mut ctx = ExecutionContext::default();
    ctx.write_gpr(3, 0xABCD_1234);
    // EXT r4, r3, lsb=8, size=8 (msbd = 7).
    run32(r_type(0x1F, 3, 4, 7, 8, 0x00), &mut ctx);
    assert_eq!(ctx.read_gpr(4), 0x12);
}

#[test]
fn ext_faults_on_a_field_past_bit_thirty_one() {
    let op = decode(r_type(0x1F, 3, 4, 7, 28, 0x00), &CapabilitySet::mips32r2())
        .unwrap_or_else(|e| panic!("EXT should decode: {e}"));
    let mut ctx = ExecutionContext::default();
    assert_eq!(execute(&op, &mut ctx), Err(RuntimeFault::ReservedAtExecute));
}

#[test]
fn ins_merges_into_the_target_field() {
    let mut ctx = ExecutionContext::default();
    ctx.write_gpr(3, 0xFF); // source
    ctx.write_gpr(4, 0xABCD_0034); // destination
    // INS r4, r3, lsb=8, msb=15.
    run32(r_type(0x1F, 3, 4, 15, 8, 0x04), &mut ctx);
    assert_eq!(ctx.read_gpr(4), 0xFFFF_FFFF_ABCD_FF34);
}

#[test]
fn ins_faults_when_msb_precedes_lsb() {
    let op = decode(r_type(0x1F, 3, 4, 7, 8, 0x04), &CapabilitySet::mips32r2())
        .unwrap_or_else(|e| panic!("INS should decode: {e}"));
    let mut ctx = ExecutionContext::default();
    assert_eq!(execute(&op, &mut ctx), Err(RuntimeFault::ReservedAtExecute));
}

#[test]
fn seb_and_seh_sign_extend_sub_words() {
    let mut ctx = ExecutionContext::default();
    ctx.write_gpr(4, 0x80);
    run32(r_type(0x1F, 0, 4, 5, 0x10, 0x20), &mut ctx); // SEB
    assert_eq!(ctx.read_gpr(5), 0xFFFF_FFFF_FFFF_FF80);

    ctx.write_gpr(4, 0x7FFF);
    run32(r_type(0x1F, 0, 4, 5, 0x18, 0x20), &mut ctx); // SEH
    assert_eq!(ctx.read_gpr(5), 0x7FFF);
}

#[test]
fn wsbh_swaps_bytes_within_each_halfword() {
    let mut ctx = ExecutionContext::default();
    ctx.write_gpr(4, 0x1234_5678);
    run32(r_type(0x1F, 0, 4, 5, 0x02, 0x20), &mut ctx);
    assert_eq!(ctx.read_gpr(5), 0x3412_7856);
}

#[test]
fn clz_and_clo_count_leading_bits() {
    let mut ctx = ExecutionContext::default();
    ctx.write_gpr(3, 0x0000_FFFF);
    run32(r_type(0x1C, 3, 0, 5, 0, 0x20), &mut ctx); // CLZ
    assert_eq!(ctx.read_gpr(5), 16);

    ctx.write_gpr(3, 0xFFFF_0000);
    run32(r_type(0x1C, 3, 0, 5, 0, 0x21), &mut ctx); // CLO
    assert_eq!(ctx.read_gpr(5), 16);
}

#[test]
fn movz_and_movn_commit_conditionally() {
    let mut ctx = ExecutionContext::default();
    ctx.write_gpr(1, 0x1111);
    ctx.write_gpr(5, 0x5555);
    // MOVZ r5, r1, r2 with r2 == 0: commits.
    run32(r_type(0x00, 1, 2, 5, 0, 0x0A), &mut ctx);
    assert_eq!(ctx.read_gpr(5), 0x1111);

    ctx.write_gpr(5, 0x5555);
    // MOVN r5, r1, r2 with r2 == 0: destination keeps its value.
    run32(r_type(0x00, 1, 2, 5, 0, 0x0B), &mut ctx);
    assert_eq!(ctx.read_gpr(5), 0x5555);
}

#[test]
fn adduh_qb_averages_each_byte_lane() {
    let caps = CapabilitySet::mips32r2().with_ase(ase::DSP_R2);
    let mut ctx = ExecutionContext::default();
    ctx.write_gpr(3, 0x10FF_0004);
    ctx.write_gpr(4, 0x20FF_0002);
    run_with(r_type(0x1F, 3, 4, 5, 0, 0x18), &caps, &mut ctx);
    assert_eq!(ctx.read_gpr(5), 0x18FF_0003, "per-lane floor average");
}

#[test]
fn mult_g_writes_the_product_to_a_gpr() {
    let caps = CapabilitySet::mips32r2().with_ase(ase::LOONGSON_2E);
    let mut ctx = ExecutionContext::default();
    ctx.hi = 0x7777;
    ctx.write_gpr(3, 6);
    ctx.write_gpr(4, 7);
    run_with(r_type(0x1F, 3, 4, 5, 0, 0x18), &caps, &mut ctx);
    assert_eq!(ctx.read_gpr(5), 42);
    assert_eq!(ctx.hi, 0x7777, "HI/LO are not involved");
}
