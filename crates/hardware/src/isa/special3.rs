//! SPECIAL3 encoding group (major opcode 0x1F).
//!
//! Release 2 bitfield operations, the BSHFL sub-group (dispatched on the sa
//! field as a third level), and the documented encoding collision at
//! function 0x18: DSP-R2 `ADDUH.QB` and Loongson-2E `MULT.G` share the
//! same bits and are told apart only by which extension the core carries.
//! The alias list resolves in priority order, newer extension first.

use crate::isa::caps::{ase, isa};
use crate::isa::operation::{Format, OpKind};
use crate::isa::table::{Node, OpcodeTable, Spec};

/// Extract bit field.
pub const EXT: u32 = 0x00;
/// Insert bit field.
pub const INS: u32 = 0x04;
/// Shared function code: ADDUH.QB (DSP-R2) / MULT.G (Loongson-2E).
pub const ADDUH_QB_OR_MULT_G: u32 = 0x18;
/// BSHFL sub-group (SEB/SEH/WSBH, selected by the sa field).
pub const BSHFL: u32 = 0x20;

/// BSHFL sa-field sub-opcode: word swap bytes within halfwords.
pub const WSBH_SA: u32 = 0x02;
/// BSHFL sa-field sub-opcode: sign-extend byte.
pub const SEB_SA: u32 = 0x10;
/// BSHFL sa-field sub-opcode: sign-extend halfword.
pub const SEH_SA: u32 = 0x18;

/// BSHFL third level, keyed on the sa field.
static BSHFL_TABLE: OpcodeTable = OpcodeTable {
    mask: 0x1F << 6,
    entries: &[
        (
            WSBH_SA << 6,
            Node::Op(Spec::new(OpKind::Wsbh, Format::Reg).isa(isa::MIPS32R2)),
        ),
        (
            SEB_SA << 6,
            Node::Op(Spec::new(OpKind::Seb, Format::Reg).isa(isa::MIPS32R2)),
        ),
        (
            SEH_SA << 6,
            Node::Op(Spec::new(OpKind::Seh, Format::Reg).isa(isa::MIPS32R2)),
        ),
    ],
};

/// Alias arms for function 0x18, checked in priority order.
static DSP_LOONGSON_ALIAS: [(u32, Node); 2] = [
    (
        ase::DSP_R2,
        Node::Op(Spec::new(OpKind::AdduhQb, Format::Reg).ase(ase::DSP_R2)),
    ),
    (
        ase::LOONGSON_2E,
        Node::Op(Spec::new(OpKind::MultG, Format::Reg).ase(ase::LOONGSON_2E)),
    ),
];

/// The SPECIAL3 dispatch table, keyed on the function field.
pub static TABLE: OpcodeTable = OpcodeTable {
    mask: 0x3F,
    entries: &[
        (
            EXT,
            Node::Op(Spec::new(OpKind::Ext, Format::Reg).isa(isa::MIPS32R2)),
        ),
        (
            INS,
            Node::Op(Spec::new(OpKind::Ins, Format::Reg).isa(isa::MIPS32R2)),
        ),
        (ADDUH_QB_OR_MULT_G, Node::Alias(&DSP_LOONGSON_ALIAS)),
        (BSHFL, Node::Table(&BSHFL_TABLE)),
    ],
};
