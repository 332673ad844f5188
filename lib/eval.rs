//! Concrete evaluation and simplification of expressions.
//!
//! [`eval`] evaluates an expression containing no variables or memory reads
//! down to a single constant. [`simplify`] folds every such subtree of a
//! larger expression, leaving the symbolic parts untouched. Both are pure.

use crate::error::{Error, Result};
use crate::il::{Constant, Expression, MemoryLocation};

/// Sign-extend a constant's value through 64 bits.
fn sign_extend(constant: &Constant) -> i64 {
    let value = constant.value();
    if constant.bits() >= 64 {
        return value as i64;
    }
    if value & (1 << (constant.bits() - 1)) != 0 {
        (value | (u64::MAX << constant.bits())) as i64
    } else {
        value as i64
    }
}

fn truth(value: bool) -> Constant {
    Constant::new(if value { 1 } else { 0 }, 1)
}

/// Evaluate a variable-free expression to a constant.
/// # Error
/// The expression contains a variable or a memory read, or evaluation
/// divides by zero.
pub fn eval(expression: &Expression) -> Result<Constant> {
    match expression {
        Expression::Variable(variable) => {
            Err(Error::UnboundVariable(variable.name().to_string()))
        }
        Expression::Memory(memory) => Err(Error::UnboundMemory(memory.to_string())),

        Expression::Constant(constant) => Ok(constant.clone()),

        Expression::Add(lhs, rhs) => {
            let r = eval(lhs)?.value().wrapping_add(eval(rhs)?.value());
            Ok(Constant::new(r, lhs.bits()))
        }

        Expression::Sub(lhs, rhs) => {
            let r = eval(lhs)?.value().wrapping_sub(eval(rhs)?.value());
            Ok(Constant::new(r, lhs.bits()))
        }

        Expression::Mul(lhs, rhs) => {
            let r = eval(lhs)?.value().wrapping_mul(eval(rhs)?.value());
            Ok(Constant::new(r, lhs.bits()))
        }

        Expression::Divu(lhs, rhs) => {
            let rhs = eval(rhs)?;
            if rhs.is_zero() {
                return Err(Error::DivideByZero);
            }
            let r = eval(lhs)?.value() / rhs.value();
            Ok(Constant::new(r, lhs.bits()))
        }

        Expression::Modu(lhs, rhs) => {
            let rhs = eval(rhs)?;
            if rhs.is_zero() {
                return Err(Error::DivideByZero);
            }
            let r = eval(lhs)?.value() % rhs.value();
            Ok(Constant::new(r, lhs.bits()))
        }

        Expression::Divs(lhs, rhs) => {
            let rhs = eval(rhs)?;
            if rhs.is_zero() {
                return Err(Error::DivideByZero);
            }
            let r = sign_extend(&eval(lhs)?).wrapping_div(sign_extend(&rhs));
            Ok(Constant::new(r as u64, lhs.bits()))
        }

        Expression::Mods(lhs, rhs) => {
            let rhs = eval(rhs)?;
            if rhs.is_zero() {
                return Err(Error::DivideByZero);
            }
            let r = sign_extend(&eval(lhs)?).wrapping_rem(sign_extend(&rhs));
            Ok(Constant::new(r as u64, lhs.bits()))
        }

        Expression::And(lhs, rhs) => {
            let r = eval(lhs)?.value() & eval(rhs)?.value();
            Ok(Constant::new(r, lhs.bits()))
        }

        Expression::Or(lhs, rhs) => {
            let r = eval(lhs)?.value() | eval(rhs)?.value();
            Ok(Constant::new(r, lhs.bits()))
        }

        Expression::Xor(lhs, rhs) => {
            let r = eval(lhs)?.value() ^ eval(rhs)?.value();
            Ok(Constant::new(r, lhs.bits()))
        }

        Expression::Shl(lhs, rhs) => {
            let shift = eval(rhs)?.value();
            let r = if shift >= 64 { 0 } else { eval(lhs)?.value() << shift };
            Ok(Constant::new(r, lhs.bits()))
        }

        Expression::Shr(lhs, rhs) => {
            let shift = eval(rhs)?.value();
            let r = if shift >= 64 { 0 } else { eval(lhs)?.value() >> shift };
            Ok(Constant::new(r, lhs.bits()))
        }

        Expression::Cmpeq(lhs, rhs) => Ok(truth(eval(lhs)?.value() == eval(rhs)?.value())),

        Expression::Cmpneq(lhs, rhs) => Ok(truth(eval(lhs)?.value() != eval(rhs)?.value())),

        Expression::Cmplts(lhs, rhs) => {
            Ok(truth(sign_extend(&eval(lhs)?) < sign_extend(&eval(rhs)?)))
        }

        Expression::Cmpltu(lhs, rhs) => Ok(truth(eval(lhs)?.value() < eval(rhs)?.value())),

        Expression::Zext(bits, src) => Ok(Constant::new(eval(src)?.value(), *bits)),

        Expression::Sext(bits, src) => {
            Ok(Constant::new(sign_extend(&eval(src)?) as u64, *bits))
        }

        Expression::Trun(bits, src) => Ok(Constant::new(eval(src)?.value(), *bits)),
    }
}

/// Fold every variable-free subtree of an expression to a constant.
///
/// Symbolic subtrees are rebuilt unchanged, so the result has the same sort
/// as the input, and simplifying twice changes nothing further.
/// # Error
/// A folded subtree divides by zero. This is a defect in the analyzed
/// program or the decoder, and is propagated rather than masked.
pub fn simplify(expression: &Expression) -> Result<Expression> {
    fn binary<F>(lhs: &Expression, rhs: &Expression, rebuild: F) -> Result<Expression>
    where
        F: Fn(Box<Expression>, Box<Expression>) -> Expression,
    {
        let node = rebuild(Box::new(simplify(lhs)?), Box::new(simplify(rhs)?));
        if node.all_constants() {
            Ok(Expression::Constant(eval(&node)?))
        } else {
            Ok(node)
        }
    }

    fn unary<F>(bits: usize, src: &Expression, rebuild: F) -> Result<Expression>
    where
        F: Fn(usize, Box<Expression>) -> Expression,
    {
        let node = rebuild(bits, Box::new(simplify(src)?));
        if node.all_constants() {
            Ok(Expression::Constant(eval(&node)?))
        } else {
            Ok(node)
        }
    }

    match expression {
        Expression::Variable(_) | Expression::Constant(_) => Ok(expression.clone()),
        Expression::Memory(memory) => Ok(Expression::Memory(Box::new(MemoryLocation::new(
            simplify(memory.address())?,
            memory.bits(),
        )))),
        Expression::Add(lhs, rhs) => binary(lhs, rhs, Expression::Add),
        Expression::Sub(lhs, rhs) => binary(lhs, rhs, Expression::Sub),
        Expression::Mul(lhs, rhs) => binary(lhs, rhs, Expression::Mul),
        Expression::Divu(lhs, rhs) => binary(lhs, rhs, Expression::Divu),
        Expression::Modu(lhs, rhs) => binary(lhs, rhs, Expression::Modu),
        Expression::Divs(lhs, rhs) => binary(lhs, rhs, Expression::Divs),
        Expression::Mods(lhs, rhs) => binary(lhs, rhs, Expression::Mods),
        Expression::And(lhs, rhs) => binary(lhs, rhs, Expression::And),
        Expression::Or(lhs, rhs) => binary(lhs, rhs, Expression::Or),
        Expression::Xor(lhs, rhs) => binary(lhs, rhs, Expression::Xor),
        Expression::Shl(lhs, rhs) => binary(lhs, rhs, Expression::Shl),
        Expression::Shr(lhs, rhs) => binary(lhs, rhs, Expression::Shr),
        Expression::Cmpeq(lhs, rhs) => binary(lhs, rhs, Expression::Cmpeq),
        Expression::Cmpneq(lhs, rhs) => binary(lhs, rhs, Expression::Cmpneq),
        Expression::Cmplts(lhs, rhs) => binary(lhs, rhs, Expression::Cmplts),
        Expression::Cmpltu(lhs, rhs) => binary(lhs, rhs, Expression::Cmpltu),
        Expression::Zext(bits, src) => unary(*bits, src, Expression::Zext),
        Expression::Sext(bits, src) => unary(*bits, src, Expression::Sext),
        Expression::Trun(bits, src) => unary(*bits, src, Expression::Trun),
    }
}
