//! MIPS instruction set: field extraction, capability gating, opcode tables,
//! and decoding.
//!
//! # Structure
//!
//! - `bits`: Raw field extraction from 32-bit instruction words.
//! - `caps`: Capability set (ISA revision levels and ASE flags).
//! - `operation`: Operation kinds and the decoded-operation descriptor.
//! - `table`: Masked-match tables and the dispatch node types.
//! - `major` / `special` / `special2` / `special3` / `regimm` / `cop1`:
//!   Encoding groups, one module per dispatch table.
//! - `decode`: The decoder walking the table hierarchy.

/// Instruction word field extraction.
pub mod bits;
/// Capability set: ISA levels, ASEs, and 64-bit mode.
pub mod caps;
/// Coprocessor 1 (FPU) encoding group, fmt-selected.
pub mod cop1;
/// Table walk and operand extraction.
pub mod decode;
/// Major opcode (bits 31:26) constants and the top-level table.
pub mod major;
/// Operation kinds and the decoded descriptor.
pub mod operation;
/// REGIMM encoding group (rt-field dispatch).
pub mod regimm;
/// SPECIAL encoding group (function-field dispatch).
pub mod special;
/// SPECIAL2 encoding group (multiply-accumulate, count-leading).
pub mod special2;
/// SPECIAL3 encoding group (bitfield ops, BSHFL, DSP/Loongson alias).
pub mod special3;
/// Masked bitfield matcher and dispatch table node types.
pub mod table;
