//! Parameter signatures for signature help.

use std::fmt;

use crate::descriptor::FunctionDescriptor;

/// How many repetitions of a variadic tail are shown.
const VARIADIC_PREVIEW: usize = 2;

/// One rendered signature: `Filter(source, condition1, condition2)`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Signature {
    pub function: String,
    pub labels: Vec<String>,
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.function, self.labels.join(", "))
    }
}

/// Labels for a call with `arity` arguments, or `None` if the overload
/// does not take that many.
///
/// Repetitions of a variadic tail are numbered from 1.
pub fn signature_for_arity(descriptor: &FunctionDescriptor, arity: usize) -> Option<Signature> {
    if !descriptor.arity.contains(arity) {
        return None;
    }
    let labels = (0..arity).map(|index| label(descriptor, index)).collect();
    Some(Signature {
        function: descriptor.qualified_name(),
        labels,
    })
}

/// Every signature the overload offers, shortest first. Variadic overloads
/// show their tail repeated up to [`VARIADIC_PREVIEW`] extra times.
pub fn signatures(descriptor: &FunctionDescriptor) -> impl Iterator<Item = Signature> + '_ {
    let min = descriptor.arity.min;
    let max = descriptor
        .arity
        .max
        .unwrap_or_else(|| min.max(descriptor.params.len()) + VARIADIC_PREVIEW);
    (min..=max).filter_map(|arity| signature_for_arity(descriptor, arity))
}

fn label(descriptor: &FunctionDescriptor, index: usize) -> String {
    let declared = descriptor.params.len();
    let fixed = if descriptor.arity.is_variadic() {
        declared.saturating_sub(1)
    } else {
        declared
    };
    if index < fixed {
        return match descriptor.labels.get(index) {
            Some(label) => (*label).to_string(),
            None => format!("arg{}", index + 1),
        };
    }
    let base = descriptor.labels.get(fixed).copied().unwrap_or("arg");
    format!("{base}{}", index - fixed + 1)
}

#[cfg(test)]
mod tests;
