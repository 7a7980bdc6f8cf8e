//! Semantics dispatcher.
//!
//! Applies one decoded operation to an execution context. Each call is a
//! pure function of (operation, context snapshot) to (context mutation or
//! fault); no operation spans multiple calls. Three classes of effect leave
//! this module without being performed here:
//!
//! - **Branches** return target and decision to the caller's control-flow
//!   driver, because the delay-slot instruction must still execute before
//!   the transfer takes effect.
//! - **Memory accesses** return an effective-address descriptor for the
//!   external memory layer.
//! - **COP1 arithmetic** returns an operation descriptor for the external
//!   FPU; the numeric algorithms live there.
//!
//! Fault discipline: overflow-checked arithmetic computes into a scratch
//! value and commits only on the non-overflow path, so no partial register
//! write is ever observable on a fault.

use crate::common::error::RuntimeFault;
use crate::core::context::{ExecutionContext, RA};
use crate::isa::operation::{Decoded, FpArith, FpFmt, OpKind, TrapCond};

/// Access width of a memory operation descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessWidth {
    /// One byte.
    Byte,
    /// Two bytes.
    Half,
    /// Four bytes.
    Word,
    /// Eight bytes.
    Double,
}

/// Flavor of a memory operation descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemKind {
    /// Ordinary load; `signed` selects sign- vs zero-extension of the
    /// loaded value into the target register.
    Load {
        /// Sign-extend the loaded value.
        signed: bool,
    },
    /// Ordinary store of the source register's low bytes.
    Store,
    /// Unaligned load, left part (LWL/LDL).
    LoadLeft,
    /// Unaligned load, right part (LWR/LDR).
    LoadRight,
    /// Unaligned store, left part (SWL/SDL).
    StoreLeft,
    /// Unaligned store, right part (SWR/SDR).
    StoreRight,
    /// Load linked (starts an atomic sequence).
    LoadLinked,
    /// Store conditional (completes an atomic sequence).
    StoreConditional,
}

/// An effective-address hand-off to the external memory layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryOp {
    /// Effective address (base register + sign-extended displacement).
    pub addr: u64,
    /// Access width.
    pub width: AccessWidth,
    /// Access flavor.
    pub kind: MemKind,
    /// GPR index sourcing (stores) or receiving (loads) the data.
    pub reg: usize,
}

/// A COP1 arithmetic hand-off to the external FPU.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FloatOp {
    /// Arithmetic operation.
    pub op: FpArith,
    /// Operand format.
    pub fmt: FpFmt,
    /// Destination FPU register.
    pub fd: usize,
    /// First source FPU register.
    pub fs: usize,
    /// Second source FPU register.
    pub ft: usize,
}

/// Result of a successful dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// All effects were committed to the context.
    Done,
    /// Control-transfer decision for the caller's driver. The instruction
    /// in the delay slot still executes before the transfer; `likely`
    /// branches annul that slot when not taken.
    Branch {
        /// Whether the branch condition held (always true for jumps).
        taken: bool,
        /// Transfer target address.
        target: u64,
        /// Branch-likely form: the delay slot is annulled when not taken.
        likely: bool,
    },
    /// Memory access descriptor for the external memory layer.
    Memory(MemoryOp),
    /// COP1 arithmetic descriptor for the external FPU.
    Float(FloatOp),
}

/// Sign-extends a 32-bit value into the 64-bit register file, the
/// architected result placement for every word-sized operation.
#[inline]
const fn se32(value: u32) -> u64 {
    value as i32 as i64 as u64
}

/// Truncates a register to its low 32 bits.
#[inline]
const fn lo32(value: u64) -> u32 {
    value as u32
}

/// Normalizes an address for the current mode: 32-bit mode keeps
/// addresses sign-extended from bit 31.
#[inline]
const fn norm_addr(ctx: &ExecutionContext, addr: u64) -> u64 {
    if ctx.mode64 { addr } else { se32(addr as u32) }
}

/// Gate for doubleword operations: decode already checked the mode, but
/// the mode can change between decode and execute, and the architecture
/// requires the fault in that window too.
#[inline]
const fn require_wide(ctx: &ExecutionContext) -> Result<(), RuntimeFault> {
    if ctx.mode64 {
        Ok(())
    } else {
        Err(RuntimeFault::ReservedAtExecute)
    }
}

/// Executes one decoded operation against the context.
///
/// # Errors
///
/// Guest-visible faults only: [`RuntimeFault::ArithmeticOverflow`] from the
/// overflow-checked add/sub family (destination unmodified),
/// [`RuntimeFault::Trap`] from a trap instruction whose condition held, and
/// [`RuntimeFault::ReservedAtExecute`] for a doubleword operation reaching
/// execute outside 64-bit mode.
pub fn execute(op: &Decoded, ctx: &mut ExecutionContext) -> Result<Outcome, RuntimeFault> {
    let rs = ctx.read_gpr(op.rs);
    let rt = ctx.read_gpr(op.rt);

    match op.kind {
        // Overflow-checked word arithmetic. The scratch result commits
        // only when the XOR sign test passes; a discarded destination
        // (rd == 0) still takes the fault.
        OpKind::Add => add32(ctx, op.rd, lo32(rs), lo32(rt)),
        OpKind::Addi => add32(ctx, op.rt, lo32(rs), op.imm as u32),
        OpKind::Sub => sub32(ctx, op.rd, lo32(rs), lo32(rt)),
        OpKind::Dadd => {
            require_wide(ctx)?;
            add64(ctx, op.rd, rs, rt)
        }
        OpKind::Daddi => {
            require_wide(ctx)?;
            add64(ctx, op.rt, rs, op.imm as u64)
        }
        OpKind::Dsub => {
            require_wide(ctx)?;
            sub64(ctx, op.rd, rs, rt)
        }

        // Wrapping arithmetic; word forms sign-extend their 32-bit result.
        OpKind::Addu => {
            ctx.write_gpr(op.rd, se32(lo32(rs).wrapping_add(lo32(rt))));
            Ok(Outcome::Done)
        }
        OpKind::Addiu => {
            ctx.write_gpr(op.rt, se32(lo32(rs).wrapping_add(op.imm as u32)));
            Ok(Outcome::Done)
        }
        OpKind::Subu => {
            ctx.write_gpr(op.rd, se32(lo32(rs).wrapping_sub(lo32(rt))));
            Ok(Outcome::Done)
        }
        OpKind::Daddu => {
            require_wide(ctx)?;
            ctx.write_gpr(op.rd, rs.wrapping_add(rt));
            Ok(Outcome::Done)
        }
        OpKind::Daddiu => {
            require_wide(ctx)?;
            ctx.write_gpr(op.rt, rs.wrapping_add(op.imm as u64));
            Ok(Outcome::Done)
        }
        OpKind::Dsubu => {
            require_wide(ctx)?;
            ctx.write_gpr(op.rd, rs.wrapping_sub(rt));
            Ok(Outcome::Done)
        }

        // Logic.
        OpKind::And => {
            ctx.write_gpr(op.rd, rs & rt);
            Ok(Outcome::Done)
        }
        OpKind::Or => {
            ctx.write_gpr(op.rd, rs | rt);
            Ok(Outcome::Done)
        }
        OpKind::Xor => {
            ctx.write_gpr(op.rd, rs ^ rt);
            Ok(Outcome::Done)
        }
        OpKind::Nor => {
            ctx.write_gpr(op.rd, !(rs | rt));
            Ok(Outcome::Done)
        }
        OpKind::Andi => {
            ctx.write_gpr(op.rt, rs & op.imm as u64);
            Ok(Outcome::Done)
        }
        OpKind::Ori => {
            ctx.write_gpr(op.rt, rs | op.imm as u64);
            Ok(Outcome::Done)
        }
        OpKind::Xori => {
            ctx.write_gpr(op.rt, rs ^ op.imm as u64);
            Ok(Outcome::Done)
        }
        OpKind::Lui => {
            ctx.write_gpr(op.rt, se32((op.imm as u32) << 16));
            Ok(Outcome::Done)
        }

        // Compares: boolean-as-integer results; signedness is in the kind.
        OpKind::Slt => {
            ctx.write_gpr(op.rd, u64::from((rs as i64) < (rt as i64)));
            Ok(Outcome::Done)
        }
        OpKind::Sltu => {
            ctx.write_gpr(op.rd, u64::from(rs < rt));
            Ok(Outcome::Done)
        }
        OpKind::Slti => {
            ctx.write_gpr(op.rt, u64::from((rs as i64) < op.imm));
            Ok(Outcome::Done)
        }
        OpKind::Sltiu => {
            ctx.write_gpr(op.rt, u64::from(rs < op.imm as u64));
            Ok(Outcome::Done)
        }

        // Shifts: the amount is masked to width-1 bits, an architected
        // step, before use.
        OpKind::Sll => {
            ctx.write_gpr(op.rd, se32(lo32(rt) << op.sa));
            Ok(Outcome::Done)
        }
        OpKind::Srl => {
            ctx.write_gpr(op.rd, se32(lo32(rt) >> op.sa));
            Ok(Outcome::Done)
        }
        OpKind::Sra => {
            ctx.write_gpr(op.rd, se32(((lo32(rt) as i32) >> op.sa) as u32));
            Ok(Outcome::Done)
        }
        OpKind::Rotr => {
            ctx.write_gpr(op.rd, se32(lo32(rt).rotate_right(op.sa)));
            Ok(Outcome::Done)
        }
        OpKind::Sllv => {
            ctx.write_gpr(op.rd, se32(lo32(rt) << (rs & 31)));
            Ok(Outcome::Done)
        }
        OpKind::Srlv => {
            ctx.write_gpr(op.rd, se32(lo32(rt) >> (rs & 31)));
            Ok(Outcome::Done)
        }
        OpKind::Srav => {
            ctx.write_gpr(op.rd, se32(((lo32(rt) as i32) >> (rs & 31)) as u32));
            Ok(Outcome::Done)
        }
        OpKind::Rotrv => {
            ctx.write_gpr(op.rd, se32(lo32(rt).rotate_right(lo32(rs) & 31)));
            Ok(Outcome::Done)
        }
        OpKind::Dsll => {
            require_wide(ctx)?;
            ctx.write_gpr(op.rd, rt << op.sa);
            Ok(Outcome::Done)
        }
        OpKind::Dsrl => {
            require_wide(ctx)?;
            ctx.write_gpr(op.rd, rt >> op.sa);
            Ok(Outcome::Done)
        }
        OpKind::Dsra => {
            require_wide(ctx)?;
            ctx.write_gpr(op.rd, ((rt as i64) >> op.sa) as u64);
            Ok(Outcome::Done)
        }
        OpKind::Dsll32 => {
            require_wide(ctx)?;
            ctx.write_gpr(op.rd, rt << (op.sa + 32));
            Ok(Outcome::Done)
        }
        OpKind::Dsrl32 => {
            require_wide(ctx)?;
            ctx.write_gpr(op.rd, rt >> (op.sa + 32));
            Ok(Outcome::Done)
        }
        OpKind::Dsra32 => {
            require_wide(ctx)?;
            ctx.write_gpr(op.rd, ((rt as i64) >> (op.sa + 32)) as u64);
            Ok(Outcome::Done)
        }
        OpKind::Dsllv => {
            require_wide(ctx)?;
            ctx.write_gpr(op.rd, rt << (rs & 63));
            Ok(Outcome::Done)
        }
        OpKind::Dsrlv => {
            require_wide(ctx)?;
            ctx.write_gpr(op.rd, rt >> (rs & 63));
            Ok(Outcome::Done)
        }
        OpKind::Dsrav => {
            require_wide(ctx)?;
            ctx.write_gpr(op.rd, ((rt as i64) >> (rs & 63)) as u64);
            Ok(Outcome::Done)
        }

        // Conditional moves: the destination is written only when the
        // condition holds; otherwise it keeps its old value.
        OpKind::Movz => {
            if rt == 0 {
                ctx.write_gpr(op.rd, rs);
            }
            Ok(Outcome::Done)
        }
        OpKind::Movn => {
            if rt != 0 {
                ctx.write_gpr(op.rd, rs);
            }
            Ok(Outcome::Done)
        }

        // HI/LO moves.
        OpKind::Mfhi => {
            ctx.write_gpr(op.rd, ctx.hi);
            Ok(Outcome::Done)
        }
        OpKind::Mflo => {
            ctx.write_gpr(op.rd, ctx.lo);
            Ok(Outcome::Done)
        }
        OpKind::Mthi => {
            ctx.hi = rs;
            Ok(Outcome::Done)
        }
        OpKind::Mtlo => {
            ctx.lo = rs;
            Ok(Outcome::Done)
        }

        // Multiply/divide into HI/LO.
        OpKind::Mult => {
            let prod = i64::from(lo32(rs) as i32) * i64::from(lo32(rt) as i32);
            set_hilo(ctx, prod as u64);
            Ok(Outcome::Done)
        }
        OpKind::Multu => {
            let prod = u64::from(lo32(rs)) * u64::from(lo32(rt));
            set_hilo(ctx, prod);
            Ok(Outcome::Done)
        }
        OpKind::Div => {
            // Divide by zero is architecturally UNPREDICTABLE; HI/LO are
            // left untouched, matching hardware practice. INT_MIN / -1
            // wraps.
            let (num, den) = (lo32(rs) as i32, lo32(rt) as i32);
            if den != 0 {
                ctx.lo = se32(num.wrapping_div(den) as u32);
                ctx.hi = se32(num.wrapping_rem(den) as u32);
            }
            Ok(Outcome::Done)
        }
        OpKind::Divu => {
            let (num, den) = (lo32(rs), lo32(rt));
            if den != 0 {
                ctx.lo = se32(num / den);
                ctx.hi = se32(num % den);
            }
            Ok(Outcome::Done)
        }

        // Multiply-accumulate (SPECIAL2).
        OpKind::Madd => {
            let prod = (i64::from(lo32(rs) as i32) * i64::from(lo32(rt) as i32)) as u64;
            let acc = hilo(ctx).wrapping_add(prod);
            set_hilo(ctx, acc);
            Ok(Outcome::Done)
        }
        OpKind::Maddu => {
            let prod = u64::from(lo32(rs)) * u64::from(lo32(rt));
            let acc = hilo(ctx).wrapping_add(prod);
            set_hilo(ctx, acc);
            Ok(Outcome::Done)
        }
        OpKind::Msub => {
            let prod = (i64::from(lo32(rs) as i32) * i64::from(lo32(rt) as i32)) as u64;
            let acc = hilo(ctx).wrapping_sub(prod);
            set_hilo(ctx, acc);
            Ok(Outcome::Done)
        }
        OpKind::Msubu => {
            let prod = u64::from(lo32(rs)) * u64::from(lo32(rt));
            let acc = hilo(ctx).wrapping_sub(prod);
            set_hilo(ctx, acc);
            Ok(Outcome::Done)
        }
        OpKind::Mul => {
            // Low 32 product bits to a GPR; HI/LO become unpredictable
            // architecturally and are deliberately left alone here.
            let prod = (lo32(rs) as i32).wrapping_mul(lo32(rt) as i32);
            ctx.write_gpr(op.rd, se32(prod as u32));
            Ok(Outcome::Done)
        }
        OpKind::MultG => {
            let prod = (lo32(rs) as i32).wrapping_mul(lo32(rt) as i32);
            ctx.write_gpr(op.rd, se32(prod as u32));
            Ok(Outcome::Done)
        }

        // Count-leading.
        OpKind::Clz => {
            ctx.write_gpr(op.rd, u64::from(lo32(rs).leading_zeros()));
            Ok(Outcome::Done)
        }
        OpKind::Clo => {
            ctx.write_gpr(op.rd, u64::from((!lo32(rs)).leading_zeros()));
            Ok(Outcome::Done)
        }
        OpKind::Dclz => {
            require_wide(ctx)?;
            ctx.write_gpr(op.rd, u64::from(rs.leading_zeros()));
            Ok(Outcome::Done)
        }
        OpKind::Dclo => {
            require_wide(ctx)?;
            ctx.write_gpr(op.rd, u64::from((!rs).leading_zeros()));
            Ok(Outcome::Done)
        }

        // Bitfield and byte-manipulation (Release 2).
        OpKind::Ext => {
            let (lsb, size) = (op.sa, op.rd as u32 + 1);
            if lsb + size > 32 {
                return Err(RuntimeFault::ReservedAtExecute);
            }
            let mask = (1u64 << size) - 1;
            ctx.write_gpr(op.rt, se32(((u64::from(lo32(rs)) >> lsb) & mask) as u32));
            Ok(Outcome::Done)
        }
        OpKind::Ins => {
            let (lsb, msb) = (op.sa, op.rd as u32);
            if lsb > msb {
                return Err(RuntimeFault::ReservedAtExecute);
            }
            let size = msb - lsb + 1;
            let mask = (((1u64 << size) - 1) << lsb) as u32;
            let merged = (lo32(rt) & !mask) | ((lo32(rs) << lsb) & mask);
            ctx.write_gpr(op.rt, se32(merged));
            Ok(Outcome::Done)
        }
        OpKind::Seb => {
            ctx.write_gpr(op.rd, rt as u8 as i8 as i64 as u64);
            Ok(Outcome::Done)
        }
        OpKind::Seh => {
            ctx.write_gpr(op.rd, rt as u16 as i16 as i64 as u64);
            Ok(Outcome::Done)
        }
        OpKind::Wsbh => {
            let x = lo32(rt);
            let swapped = ((x & 0x00FF_00FF) << 8) | ((x >> 8) & 0x00FF_00FF);
            ctx.write_gpr(op.rd, se32(swapped));
            Ok(Outcome::Done)
        }
        OpKind::AdduhQb => {
            // Per-byte floor average; no overflow by construction.
            let (a, b) = (lo32(rs), lo32(rt));
            let mut out = 0u32;
            for lane in 0..4 {
                let shift = lane * 8;
                let sum = ((a >> shift) & 0xFF) + ((b >> shift) & 0xFF);
                out |= (sum >> 1) << shift;
            }
            ctx.write_gpr(op.rd, se32(out));
            Ok(Outcome::Done)
        }

        // Jumps. Link writes are unconditional and happen here; the
        // transfer itself is the driver's, after the delay slot.
        OpKind::J => Ok(jump_target(ctx, op.imm as u64)),
        OpKind::Jal => {
            let link = ctx.pc.wrapping_add(8);
            ctx.write_gpr(RA, link);
            Ok(jump_target(ctx, op.imm as u64))
        }
        OpKind::Jr => Ok(Outcome::Branch {
            taken: true,
            target: norm_addr(ctx, rs),
            likely: false,
        }),
        OpKind::Jalr => {
            // Target is read before the link write so rd == rs still
            // transfers to the pre-link value.
            let target = norm_addr(ctx, rs);
            ctx.write_gpr(op.rd, ctx.pc.wrapping_add(8));
            Ok(Outcome::Branch {
                taken: true,
                target,
                likely: false,
            })
        }

        // Conditional branches: operands were loaded eagerly above, so
        // the decision is fixed before any side effect.
        OpKind::Beq => Ok(branch(ctx, op, rs == rt, false)),
        OpKind::Bne => Ok(branch(ctx, op, rs != rt, false)),
        OpKind::Blez => Ok(branch(ctx, op, (rs as i64) <= 0, false)),
        OpKind::Bgtz => Ok(branch(ctx, op, (rs as i64) > 0, false)),
        OpKind::Beql => Ok(branch(ctx, op, rs == rt, true)),
        OpKind::Bnel => Ok(branch(ctx, op, rs != rt, true)),
        OpKind::Blezl => Ok(branch(ctx, op, (rs as i64) <= 0, true)),
        OpKind::Bgtzl => Ok(branch(ctx, op, (rs as i64) > 0, true)),
        OpKind::Bltz => Ok(branch(ctx, op, (rs as i64) < 0, false)),
        OpKind::Bgez => Ok(branch(ctx, op, (rs as i64) >= 0, false)),
        OpKind::Bltzl => Ok(branch(ctx, op, (rs as i64) < 0, true)),
        OpKind::Bgezl => Ok(branch(ctx, op, (rs as i64) >= 0, true)),
        OpKind::Bltzal => Ok(branch_and_link(ctx, op, (rs as i64) < 0, false)),
        OpKind::Bgezal => Ok(branch_and_link(ctx, op, (rs as i64) >= 0, false)),
        OpKind::Bltzall => Ok(branch_and_link(ctx, op, (rs as i64) < 0, true)),
        OpKind::Bgezall => Ok(branch_and_link(ctx, op, (rs as i64) >= 0, true)),

        // Traps. Constant outcomes were folded at decode time.
        OpKind::TrapAlways => Err(RuntimeFault::Trap(op.code)),
        OpKind::TrapNever => Ok(Outcome::Done),
        OpKind::Trap(cond) => trap_if(cond, rs, rt, op.code),
        OpKind::TrapImm(cond) => trap_if(cond, rs, op.imm as u64, 0),

        // Loads and stores: effective address only; the access itself is
        // the memory layer's.
        OpKind::Lb => Ok(memory(ctx, op, AccessWidth::Byte, MemKind::Load { signed: true })),
        OpKind::Lbu => Ok(memory(ctx, op, AccessWidth::Byte, MemKind::Load { signed: false })),
        OpKind::Lh => Ok(memory(ctx, op, AccessWidth::Half, MemKind::Load { signed: true })),
        OpKind::Lhu => Ok(memory(ctx, op, AccessWidth::Half, MemKind::Load { signed: false })),
        OpKind::Lw => Ok(memory(ctx, op, AccessWidth::Word, MemKind::Load { signed: true })),
        OpKind::Lwl => Ok(memory(ctx, op, AccessWidth::Word, MemKind::LoadLeft)),
        OpKind::Lwr => Ok(memory(ctx, op, AccessWidth::Word, MemKind::LoadRight)),
        OpKind::Sb => Ok(memory(ctx, op, AccessWidth::Byte, MemKind::Store)),
        OpKind::Sh => Ok(memory(ctx, op, AccessWidth::Half, MemKind::Store)),
        OpKind::Sw => Ok(memory(ctx, op, AccessWidth::Word, MemKind::Store)),
        OpKind::Swl => Ok(memory(ctx, op, AccessWidth::Word, MemKind::StoreLeft)),
        OpKind::Swr => Ok(memory(ctx, op, AccessWidth::Word, MemKind::StoreRight)),
        OpKind::Ll => Ok(memory(ctx, op, AccessWidth::Word, MemKind::LoadLinked)),
        OpKind::Sc => Ok(memory(ctx, op, AccessWidth::Word, MemKind::StoreConditional)),
        OpKind::Lwu => {
            require_wide(ctx)?;
            Ok(memory(ctx, op, AccessWidth::Word, MemKind::Load { signed: false }))
        }
        OpKind::Ld => {
            require_wide(ctx)?;
            Ok(memory(ctx, op, AccessWidth::Double, MemKind::Load { signed: true }))
        }
        OpKind::Sd => {
            require_wide(ctx)?;
            Ok(memory(ctx, op, AccessWidth::Double, MemKind::Store))
        }
        OpKind::Ldl => {
            require_wide(ctx)?;
            Ok(memory(ctx, op, AccessWidth::Double, MemKind::LoadLeft))
        }
        OpKind::Ldr => {
            require_wide(ctx)?;
            Ok(memory(ctx, op, AccessWidth::Double, MemKind::LoadRight))
        }
        OpKind::Sdl => {
            require_wide(ctx)?;
            Ok(memory(ctx, op, AccessWidth::Double, MemKind::StoreLeft))
        }
        OpKind::Sdr => {
            require_wide(ctx)?;
            Ok(memory(ctx, op, AccessWidth::Double, MemKind::StoreRight))
        }

        // COP1 arithmetic: descriptor only. Field positions: ft=rt,
        // fs=rd, fd=sa.
        OpKind::Fp(arith, fmt) => Ok(Outcome::Float(FloatOp {
            op: arith,
            fmt,
            fd: op.sa as usize,
            fs: op.rd,
            ft: op.rt,
        })),
    }
}

/// HI/LO viewed as one 64-bit accumulator (low 32 bits of each half).
#[inline]
fn hilo(ctx: &ExecutionContext) -> u64 {
    (u64::from(lo32(ctx.hi)) << 32) | u64::from(lo32(ctx.lo))
}

/// Splits a 64-bit value into HI/LO with word sign extension.
#[inline]
fn set_hilo(ctx: &mut ExecutionContext, value: u64) {
    ctx.lo = se32(value as u32);
    ctx.hi = se32((value >> 32) as u32);
}

/// Overflow-checked 32-bit add: commit or fault, never both.
fn add32(ctx: &mut ExecutionContext, dest: usize, a: u32, b: u32) -> Result<Outcome, RuntimeFault> {
    let result = a.wrapping_add(b);
    if (!(a ^ b) & (a ^ result)) & 0x8000_0000 != 0 {
        return Err(RuntimeFault::ArithmeticOverflow);
    }
    ctx.write_gpr(dest, se32(result));
    Ok(Outcome::Done)
}

/// Overflow-checked 32-bit subtract.
fn sub32(ctx: &mut ExecutionContext, dest: usize, a: u32, b: u32) -> Result<Outcome, RuntimeFault> {
    let result = a.wrapping_sub(b);
    if ((a ^ b) & (a ^ result)) & 0x8000_0000 != 0 {
        return Err(RuntimeFault::ArithmeticOverflow);
    }
    ctx.write_gpr(dest, se32(result));
    Ok(Outcome::Done)
}

/// Overflow-checked 64-bit add.
fn add64(ctx: &mut ExecutionContext, dest: usize, a: u64, b: u64) -> Result<Outcome, RuntimeFault> {
    let result = a.wrapping_add(b);
    if (!(a ^ b) & (a ^ result)) & 0x8000_0000_0000_0000 != 0 {
        return Err(RuntimeFault::ArithmeticOverflow);
    }
    ctx.write_gpr(dest, result);
    Ok(Outcome::Done)
}

/// Overflow-checked 64-bit subtract.
fn sub64(ctx: &mut ExecutionContext, dest: usize, a: u64, b: u64) -> Result<Outcome, RuntimeFault> {
    let result = a.wrapping_sub(b);
    if ((a ^ b) & (a ^ result)) & 0x8000_0000_0000_0000 != 0 {
        return Err(RuntimeFault::ArithmeticOverflow);
    }
    ctx.write_gpr(dest, result);
    Ok(Outcome::Done)
}

/// PC-relative branch outcome: displacement scaled by instruction size,
/// relative to the delay-slot address.
fn branch(ctx: &ExecutionContext, op: &Decoded, taken: bool, likely: bool) -> Outcome {
    let target = norm_addr(ctx, ctx.pc.wrapping_add(4).wrapping_add((op.imm << 2) as u64));
    Outcome::Branch {
        taken,
        target,
        likely,
    }
}

/// Branch with an unconditional link write to RA.
fn branch_and_link(ctx: &mut ExecutionContext, op: &Decoded, taken: bool, likely: bool) -> Outcome {
    let link = ctx.pc.wrapping_add(8);
    ctx.write_gpr(RA, link);
    branch(ctx, op, taken, likely)
}

/// Absolute-within-segment jump target: the 26-bit index replaces the low
/// 28 bits of the delay-slot address.
fn jump_target(ctx: &ExecutionContext, index: u64) -> Outcome {
    let base = ctx.pc.wrapping_add(4) & !0x0FFF_FFFF;
    Outcome::Branch {
        taken: true,
        target: norm_addr(ctx, base | (index << 2)),
        likely: false,
    }
}

/// Runtime trap comparison for conditions not folded at decode time.
fn trap_if(cond: TrapCond, a: u64, b: u64, code: u16) -> Result<Outcome, RuntimeFault> {
    let hit = match cond {
        TrapCond::Eq => a == b,
        TrapCond::Ne => a != b,
        TrapCond::Ge => (a as i64) >= (b as i64),
        TrapCond::Geu => a >= b,
        TrapCond::Lt => (a as i64) < (b as i64),
        TrapCond::Ltu => a < b,
    };
    if hit {
        Err(RuntimeFault::Trap(code))
    } else {
        Ok(Outcome::Done)
    }
}

/// Base+displacement effective address descriptor.
fn memory(ctx: &ExecutionContext, op: &Decoded, width: AccessWidth, kind: MemKind) -> Outcome {
    let addr = norm_addr(ctx, ctx.read_gpr(op.rs).wrapping_add(op.imm as u64));
    Outcome::Memory(MemoryOp {
        addr,
        width,
        kind,
        reg: op.rt,
    })
}
