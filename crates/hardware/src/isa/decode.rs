//! Instruction decoder.
//!
//! Walks the opcode table hierarchy for one 32-bit word, resolves
//! capability-gated aliases in priority order, applies the matched entry's
//! legality predicates against the active [`CapabilitySet`], and extracts
//! operand fields per the entry's format. Decode is total: every possible
//! word yields either a [`Decoded`] operation or a typed [`DecodeFault`],
//! and it never mutates any machine state.

use tracing::trace;

use crate::common::error::DecodeFault;
use crate::isa::bits::InstructionBits;
use crate::isa::caps::CapabilitySet;
use crate::isa::major;
use crate::isa::operation::{Decoded, Format, OpKind, TrapCond};
use crate::isa::table::{Node, Spec};

/// Decodes one instruction word under the given capability set.
///
/// # Errors
///
/// - [`DecodeFault::Reserved`] for patterns with no defined meaning under
///   the active revision (including revision-removed encodings and
///   doubleword operations outside 64-bit mode).
/// - [`DecodeFault::Unavailable`] for patterns gated by a disabled
///   coprocessor or ASE.
pub fn decode(word: u32, caps: &CapabilitySet) -> Result<Decoded, DecodeFault> {
    let spec = resolve(word, caps)?;

    // Removal outranks the base-revision requirement: an encoding both
    // introduced in MIPS II and reclaimed by R6 is Reserved on an R6 core
    // even though the MIPS II bit is present.
    if spec.removed != 0 && caps.has_isa(spec.removed) {
        trace!(word = format_args!("{word:#010x}"), "removed encoding");
        return Err(DecodeFault::Reserved { word });
    }
    if spec.isa != 0 && !caps.has_isa(spec.isa) {
        return Err(DecodeFault::Reserved { word });
    }
    if spec.mode64 && !caps.mode64 {
        return Err(DecodeFault::Reserved { word });
    }
    if spec.ase != 0 && !caps.has_ase(spec.ase) {
        return Err(DecodeFault::Unavailable { word });
    }

    Ok(fold_trap(extract(word, spec)))
}

/// Walks the table hierarchy down to a terminal spec.
fn resolve(word: u32, caps: &CapabilitySet) -> Result<&'static Spec, DecodeFault> {
    let mut node: &'static Node = major::TABLE
        .lookup(word)
        .ok_or(DecodeFault::Reserved { word })?;
    loop {
        match node {
            Node::Op(spec) => return Ok(spec),
            Node::Table(table) => {
                node = table.lookup(word).ok_or(DecodeFault::Reserved { word })?;
            }
            Node::Alias(arms) => {
                // Priority order: first arm whose capability bits are
                // active wins; mask 0 is the unconditional legacy
                // fallback. No live arm means the pattern is meaningful
                // only under a capability this core lacks.
                node = arms
                    .iter()
                    .find(|(gate, _)| *gate == 0 || caps.has_ase(*gate))
                    .map(|(_, n)| n)
                    .ok_or(DecodeFault::Unavailable { word })?;
            }
        }
    }
}

/// Extracts operand fields per the entry's format.
fn extract(word: u32, spec: &Spec) -> Decoded {
    let imm = match spec.format {
        Format::ImmSigned | Format::Branch | Format::Mem | Format::TrapImm => word.simm16(),
        Format::ImmUnsigned => i64::from(word.imm16()),
        Format::Jump => i64::from(word.index26()),
        Format::Reg | Format::ShiftImm | Format::TrapReg | Format::Fpu => 0,
    };
    let code = match spec.format {
        Format::TrapReg => word.trap_code(),
        _ => 0,
    };
    Decoded {
        raw: word,
        kind: spec.kind,
        rs: word.rs(),
        rt: word.rt(),
        rd: word.rd(),
        sa: word.sa(),
        imm,
        code,
    }
}

/// Resolves trap comparisons that are constant at decode time.
///
/// Register-form traps comparing a register with itself, and immediate-form
/// traps comparing r0 with 0, have a fixed outcome: EQ/GE/GEU always trap,
/// LT/LTU/NE never do. The dispatcher then needs no runtime comparison.
fn fold_trap(mut op: Decoded) -> Decoded {
    let folded = match op.kind {
        OpKind::Trap(cond) if op.rs == op.rt => Some(cond),
        OpKind::TrapImm(cond) if op.rs == 0 && op.imm == 0 => Some(cond),
        _ => None,
    };
    if let Some(cond) = folded {
        op.kind = match cond {
            TrapCond::Eq | TrapCond::Ge | TrapCond::Geu => OpKind::TrapAlways,
            TrapCond::Lt | TrapCond::Ltu | TrapCond::Ne => OpKind::TrapNever,
        };
    }
    op
}
