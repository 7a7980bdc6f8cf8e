//! Masked bitfield matching and dispatch table nodes.
//!
//! Decoding is an ordered chain of masked-table lookups. Each table masks
//! the instruction word with its own field mask and matches the result
//! against its entries; an entry either terminates in an operation spec,
//! re-dispatches into a narrower table, or selects between capability-gated
//! aliases in priority order. Alias lists make the "same bits, different
//! meaning per extension" cases explicit data instead of nested
//! conditionals.

use crate::isa::operation::{Format, OpKind};

/// A terminal table entry: the operation plus its legality predicates.
#[derive(Clone, Copy, Debug)]
pub struct Spec {
    /// Operation kind emitted on a successful match.
    pub kind: OpKind,
    /// Any-of ISA revision bits required; absence decodes as Reserved.
    /// Zero means legal from MIPS I.
    pub isa: u32,
    /// Any-of extension bits required; absence decodes as Unavailable.
    pub ase: u32,
    /// Any-of ISA revision bits under which this encoding was removed;
    /// presence decodes as Reserved even though the entry matched.
    pub removed: u32,
    /// Requires 64-bit mode; decodes as Reserved in 32-bit mode.
    pub mode64: bool,
    /// Operand field layout.
    pub format: Format,
}

impl Spec {
    /// An entry legal from MIPS I with no gating.
    pub const fn new(kind: OpKind, format: Format) -> Self {
        Self {
            kind,
            isa: 0,
            ase: 0,
            removed: 0,
            mode64: false,
            format,
        }
    }

    /// Requires any of the given ISA revision bits.
    pub const fn isa(self, any_of: u32) -> Self {
        Self { isa: any_of, ..self }
    }

    /// Requires any of the given extension bits.
    pub const fn ase(self, any_of: u32) -> Self {
        Self { ase: any_of, ..self }
    }

    /// Removed under any of the given ISA revision bits.
    pub const fn removed(self, any_of: u32) -> Self {
        Self {
            removed: any_of,
            ..self
        }
    }

    /// Requires 64-bit mode (doubleword operations).
    pub const fn wide(self) -> Self {
        Self {
            mode64: true,
            ..self
        }
    }
}

/// A dispatch table node.
#[derive(Clone, Copy, Debug)]
pub enum Node {
    /// Terminal entry.
    Op(Spec),
    /// Re-dispatch into a narrower table.
    Table(&'static OpcodeTable),
    /// Capability-priority alias list: `(any-of extension bits, node)`
    /// pairs checked in order; the first pair whose bits intersect the
    /// active set wins. A pair with mask 0 is an unconditional fallback.
    /// Exhaustion decodes as Unavailable: the bits are meaningful, but
    /// only under a capability this core lacks.
    Alias(&'static [(u32, Node)]),
}

/// A masked-match dispatch table.
#[derive(Debug)]
pub struct OpcodeTable {
    /// Which bits of the word participate in the match.
    pub mask: u32,
    /// `(masked value, node)` pairs. Values are distinct under `mask`;
    /// aliased encodings are expressed with [`Node::Alias`], never with
    /// duplicate entries.
    pub entries: &'static [(u32, Node)],
}

impl OpcodeTable {
    /// Returns the node matching `word & mask`, or `None` for patterns
    /// with no entry at this level.
    #[inline]
    pub fn lookup(&self, word: u32) -> Option<&'static Node> {
        let key = word & self.mask;
        self.entries
            .iter()
            .find(|(value, _)| *value == key)
            .map(|(_, node)| node)
    }
}
