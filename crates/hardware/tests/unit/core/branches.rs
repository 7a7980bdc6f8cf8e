//! Branch and Jump Dispatch.
//!
//! The dispatcher never transfers control itself; it reports the decision
//! and target to the driving loop, which still owes the delay slot. These
//! tests pin target arithmetic (displacement relative to the delay-slot
//! address, segment-local jump composition), unconditional link writes,
//! and the likely-form annul flag.

use mipsim_core::core::context::RA;
use mipsim_core::core::execute::Outcome;
use mipsim_core::{CapabilitySet, ExecutionContext, decode, execute};

use crate::common::{i_type, j_type, r_type};

fn run32(word: u32, ctx: &mut ExecutionContext) -> Outcome {
    let op = decode(word, &CapabilitySet::mips32r2())
        .unwrap_or_else(|e| panic!("word {word:#010x} should decode: {e}"));
    execute(&op, ctx).unwrap_or_else(|e| panic!("word {word:#010x} should not fault: {e}"))
}

#[test]
fn beq_target_is_relative_to_the_delay_slot() {
    let mut ctx = ExecutionContext::default();
    ctx.pc = 0x1000;
    ctx.write_gpr(1, 42);
    ctx.write_gpr(2, 42);
    let outcome = run32(i_type(0x04, 1, 2, 0x10), &mut ctx);
    assert_eq!(
        outcome,
        Outcome::Branch { taken: true, target: 0x1044, likely: false }
    );
}

#[test]
fn beq_not_taken_still_reports_the_target() {
    let mut ctx = ExecutionContext::default();
    ctx.pc = 0x1000;
    ctx.write_gpr(1, 1);
    ctx.write_gpr(2, 2);
    let outcome = run32(i_type(0x04, 1, 2, 0x10), &mut ctx);
    assert_eq!(
        outcome,
        Outcome::Branch { taken: false, target: 0x1044, likely: false }
    );
}

#[test]
fn negative_displacement_branches_backward() {
    let mut ctx = ExecutionContext::default();
    ctx.pc = 0x1000;
    let outcome = run32(i_type(0x04, 0, 0, -4), &mut ctx);
    assert_eq!(
        outcome,
        Outcome::Branch { taken: true, target: 0x0FF4, likely: false }
    );
}

#[test]
fn likely_forms_set_the_annul_flag() {
    let mut ctx = ExecutionContext::default();
    ctx.pc = 0x1000;
    ctx.write_gpr(1, 1);
    let outcome = run32(i_type(0x15, 1, 0, 8), &mut ctx); // BNEL
    assert_eq!(
        outcome,
        Outcome::Branch { taken: true, target: 0x1024, likely: true }
    );
}

#[test]
fn blez_and_bgtz_compare_signed() {
    let mut ctx = ExecutionContext::default();
    ctx.write_gpr(1, (-5i64) as u64);
    let blez = run32(i_type(0x06, 1, 0, 4), &mut ctx);
    assert!(matches!(blez, Outcome::Branch { taken: true, .. }));
    let bgtz = run32(i_type(0x07, 1, 0, 4), &mut ctx);
    assert!(matches!(bgtz, Outcome::Branch { taken: false, .. }));
}

#[test]
fn jump_replaces_the_low_twenty_eight_bits() {
    let mut ctx = ExecutionContext::default();
    ctx.pc = 0x4000_0000;
    let outcome = run32(j_type(0x02, 0x100), &mut ctx);
    assert_eq!(
        outcome,
        Outcome::Branch { taken: true, target: 0x4000_0400, likely: false }
    );
}

#[test]
fn jump_segment_comes_from_the_delay_slot_address() {
    // PC at the last word of a 256 MiB segment: the delay slot is already
    // in the next segment, and the target must follow it there.
    let mut ctx = ExecutionContext::new(true);
    ctx.pc = 0x1FFF_FFFC;
    let op = decode(j_type(0x02, 0x1), &CapabilitySet::mips64r2())
        .unwrap_or_else(|e| panic!("J should decode: {e}"));
    let outcome = execute(&op, &mut ctx).unwrap_or_else(|e| panic!("J cannot fault: {e}"));
    assert_eq!(
        outcome,
        Outcome::Branch { taken: true, target: 0x2000_0004, likely: false }
    );
}

#[test]
fn jal_links_past_the_delay_slot() {
    let mut ctx = ExecutionContext::default();
    ctx.pc = 0x1000;
    let outcome = run32(j_type(0x03, 0x100), &mut ctx);
    assert!(matches!(outcome, Outcome::Branch { taken: true, .. }));
    assert_eq!(ctx.read_gpr(RA), 0x1008);
}

#[test]
fn jr_targets_the_register_value() {
    let mut ctx = ExecutionContext::default();
    ctx.write_gpr(5, 0x0040_0000);
    let outcome = run32(r_type(0x00, 5, 0, 0, 0, 0x08), &mut ctx);
    assert_eq!(
        outcome,
        Outcome::Branch { taken: true, target: 0x0040_0000, likely: false }
    );
}

#[test]
fn jalr_reads_the_target_before_writing_the_link() {
    // rd == rs: the transfer must go to the pre-link value.
    let mut ctx = ExecutionContext::default();
    ctx.pc = 0x1000;
    ctx.write_gpr(5, 0x0040_0000);
    let outcome = run32(r_type(0x00, 5, 0, 5, 0, 0x09), &mut ctx);
    assert_eq!(
        outcome,
        Outcome::Branch { taken: true, target: 0x0040_0000, likely: false }
    );
    assert_eq!(ctx.read_gpr(5), 0x1008);
}

#[test]
fn branch_and_link_writes_ra_even_when_not_taken() {
    let mut ctx = ExecutionContext::default();
    ctx.pc = 0x2000;
    ctx.write_gpr(1, (-1i64) as u64);
    let outcome = run32(i_type(0x01, 1, 0x11, 4), &mut ctx); // BGEZAL, not taken
    assert!(matches!(outcome, Outcome::Branch { taken: false, .. }));
    assert_eq!(ctx.read_gpr(RA), 0x2008, "the link write is unconditional");
}

#[test]
fn addresses_sign_extend_in_thirty_two_bit_mode() {
    let mut ctx = ExecutionContext::new(false);
    ctx.write_gpr(5, 0x8000_0000);
    let outcome = run32(r_type(0x00, 5, 0, 0, 0, 0x08), &mut ctx);
    assert_eq!(
        outcome,
        Outcome::Branch { taken: true, target: 0xFFFF_FFFF_8000_0000, likely: false }
    );
}
