//! Memory-Operation Descriptors.
//!
//! Loads and stores never touch memory in the dispatcher; they compute an
//! effective address and hand back a typed descriptor for the external
//! memory layer. These tests pin the address arithmetic, the width and
//! flavor of each family, and 32-bit address normalization.

use mipsim_core::common::error::RuntimeFault;
use mipsim_core::core::execute::{AccessWidth, MemKind, MemoryOp, Outcome};
use mipsim_core::{CapabilitySet, ExecutionContext, decode, execute};

use crate::common::i_type;

fn mem_op(word: u32, caps: &CapabilitySet, ctx: &mut ExecutionContext) -> MemoryOp {
    let op = decode(word, caps)
        .unwrap_or_else(|e| panic!("word {word:#010x} should decode: {e}"));
    match execute(&op, ctx) {
        Ok(Outcome::Memory(mem)) => mem,
        other => panic!("expected a memory descriptor, got {other:?}"),
    }
}

fn mem32(word: u32, ctx: &mut ExecutionContext) -> MemoryOp {
    mem_op(word, &CapabilitySet::mips32r2(), ctx)
}

#[test]
fn lw_computes_base_plus_displacement() {
    let mut ctx = ExecutionContext::default();
    ctx.write_gpr(29, 0x1000);
    let mem = mem32(i_type(0x23, 29, 4, -4), &mut ctx);
    assert_eq!(mem.addr, 0x0FFC);
    assert_eq!(mem.width, AccessWidth::Word);
    assert_eq!(mem.kind, MemKind::Load { signed: true });
    assert_eq!(mem.reg, 4);
}

#[test]
fn load_signedness_follows_the_mnemonic() {
    let mut ctx = ExecutionContext::default();
    assert_eq!(
        mem32(i_type(0x20, 0, 4, 0), &mut ctx).kind,
        MemKind::Load { signed: true },
        "LB"
    );
    assert_eq!(
        mem32(i_type(0x24, 0, 4, 0), &mut ctx).kind,
        MemKind::Load { signed: false },
        "LBU"
    );
    assert_eq!(mem32(i_type(0x21, 0, 4, 0), &mut ctx).width, AccessWidth::Half);
}

#[test]
fn stores_carry_the_source_register() {
    let mut ctx = ExecutionContext::default();
    ctx.write_gpr(8, 0x2000);
    let mem = mem32(i_type(0x28, 8, 9, 6), &mut ctx); // SB
    assert_eq!(mem.addr, 0x2006);
    assert_eq!(mem.width, AccessWidth::Byte);
    assert_eq!(mem.kind, MemKind::Store);
    assert_eq!(mem.reg, 9);
}

#[test]
fn unaligned_pairs_use_left_and_right_kinds() {
    let mut ctx = ExecutionContext::default();
    assert_eq!(mem32(i_type(0x22, 0, 4, 1), &mut ctx).kind, MemKind::LoadLeft);
    assert_eq!(mem32(i_type(0x26, 0, 4, 1), &mut ctx).kind, MemKind::LoadRight);
    assert_eq!(mem32(i_type(0x2A, 0, 4, 1), &mut ctx).kind, MemKind::StoreLeft);
    assert_eq!(mem32(i_type(0x2E, 0, 4, 1), &mut ctx).kind, MemKind::StoreRight);
}

#[test]
fn ll_and_sc_mark_the_atomic_sequence() {
    let mut ctx = ExecutionContext::default();
    assert_eq!(mem32(i_type(0x30, 0, 4, 0), &mut ctx).kind, MemKind::LoadLinked);
    assert_eq!(
        mem32(i_type(0x38, 0, 4, 0), &mut ctx).kind,
        MemKind::StoreConditional
    );
}

#[test]
fn doubleword_accesses_are_eight_bytes_wide() {
    let caps = CapabilitySet::mips64r2();
    let mut ctx = ExecutionContext::new(true);
    ctx.write_gpr(3, 0x8000);
    let ld = mem_op(i_type(0x37, 3, 4, 8), &caps, &mut ctx);
    assert_eq!(ld.addr, 0x8008);
    assert_eq!(ld.width, AccessWidth::Double);
    assert_eq!(ld.kind, MemKind::Load { signed: true });
    let sd = mem_op(i_type(0x3F, 3, 4, 8), &caps, &mut ctx);
    assert_eq!(sd.kind, MemKind::Store);
}

#[test]
fn lwu_zero_extends() {
    let caps = CapabilitySet::mips64r2();
    let mut ctx = ExecutionContext::new(true);
    let mem = mem_op(i_type(0x27, 0, 4, 0), &caps, &mut ctx);
    assert_eq!(mem.width, AccessWidth::Word);
    assert_eq!(mem.kind, MemKind::Load { signed: false });
}

#[test]
fn doubleword_load_faults_when_the_mode_dropped_after_decode() {
    let op = decode(i_type(0x37, 3, 4, 0), &CapabilitySet::mips64r2())
        .unwrap_or_else(|e| panic!("LD should decode: {e}"));
    let mut ctx = ExecutionContext::new(false);
    assert_eq!(execute(&op, &mut ctx), Err(RuntimeFault::ReservedAtExecute));
}

#[test]
fn effective_addresses_sign_extend_in_thirty_two_bit_mode() {
    let mut ctx = ExecutionContext::new(false);
    ctx.write_gpr(3, 0x7FFF_FFFF);
    let mem = mem32(i_type(0x23, 3, 4, 4), &mut ctx);
    assert_eq!(
        mem.addr, 0xFFFF_FFFF_8000_0003,
        "wrap past bit 31 stays in the sign-extended window"
    );
}

#[test]
fn effective_addresses_are_full_width_in_sixty_four_bit_mode() {
    let caps = CapabilitySet::mips64r2();
    let mut ctx = ExecutionContext::new(true);
    ctx.write_gpr(3, 0x0000_0001_0000_0000);
    let mem = mem_op(i_type(0x23, 3, 4, 4), &caps, &mut ctx);
    assert_eq!(mem.addr, 0x0000_0001_0000_0004);
}
