//! Numeric evaluation
//!
//! Operands are the rendered children that read as a decimal number; any
//! other child (whitespace, words, error markers) is dropped from the operand
//! list without complaint. Results must be finite reals: a result that would
//! be complex renders a "Complex numbers" error, and an infinite or NaN one a
//! "Non-numeric result." error.

use crate::core::parser::ParseNode;
use crate::core::render::Evaluator;
use crate::data::commands::{Arithmetic, Comparison, Function, Percent};
use crate::utils::error::CommandError;

type NumResult = Result<f64, CommandError>;

/// Read rendered text as a number.
///
/// Surrounding whitespace is allowed. Infinity and NaN spellings are not
/// numbers here.
pub fn coerce_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Canonical decimal text of a result, rejecting non-finite values
pub fn format_number(value: f64) -> Result<String, CommandError> {
    if !value.is_finite() {
        return Err(CommandError::NonNumeric);
    }
    if value == 0.0 {
        // Covers -0.0 as well.
        return Ok("0".to_string());
    }
    Ok(value.to_string())
}

/// Numeric operands among the rendered children
pub(super) fn numbers(ev: &mut Evaluator<'_>, children: &[ParseNode]) -> Vec<f64> {
    children
        .iter()
        .filter(|c| !c.is_whitespace())
        .filter_map(|c| coerce_number(&ev.render(c)))
        .collect()
}

pub(super) fn bool_text(value: bool) -> String {
    let text = if value { "true" } else { "false" };
    text.to_string()
}

// ============================================================================
// Arithmetic
// ============================================================================

pub(super) fn arithmetic(
    ev: &mut Evaluator<'_>,
    op: Arithmetic,
    name: &str,
    children: &[ParseNode],
) -> Result<String, CommandError> {
    let operands = numbers(ev, children);
    let value: f64 = match op {
        Arithmetic::Add => operands.iter().sum(),
        Arithmetic::Multiply => operands.iter().product(),
        Arithmetic::Subtract => match operands.as_slice() {
            [] => return Err(CommandError::missing_number(name)),
            [x] => -x,
            [first, rest @ ..] => rest.iter().fold(*first, |acc, x| acc - x),
        },
        Arithmetic::Divide => match operands.as_slice() {
            [] => return Err(CommandError::missing_number(name)),
            [x] => 1.0 / x,
            [first, rest @ ..] => rest.iter().fold(*first, |acc, x| acc / x),
        },
        Arithmetic::Modulo => fold(&operands, name, |a, b| Ok(floored_mod(a, b)))?,
        Arithmetic::Power => fold(&operands, name, power)?,
    };
    format_number(value)
}

/// Left fold over one or more operands; a single operand is returned as is
fn fold(operands: &[f64], name: &str, step: impl Fn(f64, f64) -> NumResult) -> NumResult {
    let (first, rest) = operands
        .split_first()
        .ok_or_else(|| CommandError::missing_number(name))?;
    rest.iter().try_fold(*first, |acc, &x| step(acc, x))
}

/// Modulo with the sign of the divisor
fn floored_mod(a: f64, b: f64) -> f64 {
    let r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) {
        r + b
    } else {
        r
    }
}

fn power(base: f64, exponent: f64) -> NumResult {
    if base < 0.0 && exponent.fract() != 0.0 {
        return Err(CommandError::Complex);
    }
    Ok(base.powf(exponent))
}

// ============================================================================
// Functions
// ============================================================================

pub(super) fn function(
    ev: &mut Evaluator<'_>,
    function: Function,
    name: &str,
    children: &[ParseNode],
) -> Result<String, CommandError> {
    let operands = numbers(ev, children);
    let first = || {
        operands
            .first()
            .copied()
            .ok_or_else(|| CommandError::missing_number(name))
    };

    let value = match function {
        Function::Sin => first()?.sin(),
        Function::Cos => first()?.cos(),
        Function::Tan => first()?.tan(),
        Function::Asin => unit_domain(first()?)?.asin(),
        Function::Acos => unit_domain(first()?)?.acos(),
        Function::Atan => first()?.atan(),
        Function::Sinh => first()?.sinh(),
        Function::Cosh => first()?.cosh(),
        Function::Tanh => first()?.tanh(),
        Function::Asinh => first()?.asinh(),
        Function::Acosh => {
            let x = first()?;
            if x < 1.0 {
                return Err(CommandError::Complex);
            }
            x.acosh()
        }
        Function::Atanh => unit_domain(first()?)?.atanh(),
        Function::Erf => libm::erf(first()?),
        Function::Erfc => libm::erfc(first()?),
        Function::Gamma => libm::tgamma(first()?),
        Function::Lgamma => libm::lgamma(first()?),
        Function::Sqrt => non_negative(first()?)?.sqrt(),
        Function::Ln => non_negative(first()?)?.ln(),
        Function::Log2 => non_negative(first()?)?.log2(),
        Function::Log10 => non_negative(first()?)?.log10(),
        Function::Log => match operands.as_slice() {
            [] => return Err(CommandError::missing_number(name)),
            [x] => non_negative(*x)?.ln(),
            [base, x, ..] => non_negative(*x)?.ln() / non_negative(*base)?.ln(),
        },
        Function::Ldexp => match operands.as_slice() {
            [fraction, exponent, ..] => libm::ldexp(*fraction, *exponent as i32),
            _ => return Err(CommandError::arity(name, 2, operands.len())),
        },
        Function::Hypot => {
            if operands.is_empty() {
                return Err(CommandError::missing_number(name));
            }
            operands.iter().map(|x| x * x).sum::<f64>().sqrt()
        }
        Function::DegreesToRadians => first()?.to_radians(),
        Function::RadiansToDegrees => first()?.to_degrees(),
    };
    format_number(value)
}

fn unit_domain(x: f64) -> NumResult {
    if x.abs() > 1.0 {
        Err(CommandError::Complex)
    } else {
        Ok(x)
    }
}

fn non_negative(x: f64) -> NumResult {
    if x < 0.0 {
        Err(CommandError::Complex)
    } else {
        Ok(x)
    }
}

// ============================================================================
// Percentages and comparisons
// ============================================================================

pub(super) fn percent(
    ev: &mut Evaluator<'_>,
    op: Percent,
    name: &str,
    children: &[ParseNode],
) -> Result<String, CommandError> {
    let operands = numbers(ev, children);
    if operands.len() < 2 {
        return Err(CommandError::arity(name, 2, operands.len()));
    }
    let step = |a: f64, b: f64| -> NumResult {
        Ok(match op {
            Percent::Of => a * b / 100.0,
            Percent::Plus => a + a * b / 100.0,
            Percent::Minus => a - a * b / 100.0,
            Percent::OfTotal => a * 100.0 / b,
        })
    };
    format_number(fold(&operands, name, step)?)
}

/// Chained comparison: true when every adjacent pair satisfies `op`
pub(super) fn compare(
    ev: &mut Evaluator<'_>,
    op: Comparison,
    children: &[ParseNode],
) -> Result<String, CommandError> {
    let operands = numbers(ev, children);
    let holds = operands.windows(2).all(|pair| {
        let (a, b) = (pair[0], pair[1]);
        match op {
            Comparison::Equal => a == b,
            Comparison::NotEqual => a != b,
            Comparison::Less => a < b,
            Comparison::LessEqual => a <= b,
            Comparison::Greater => a > b,
            Comparison::GreaterEqual => a >= b,
        }
    });
    Ok(bool_text(holds))
}
