//! Overloads whose types need more than a descriptor row.
//!
//! Each carries a descriptor like the table-driven builtins, so arity and
//! declared-parameter checks still run in the shared protocol; only the
//! hooks differ.

mod aggregate;
mod collection;
mod count;
mod pattern;
mod reduce;
mod sequence;
mod table;
mod trace;
mod types;

use crate::{FunctionRegistry, RegistryError};

use aggregate::{Aggregate, DateTimeExtremum, ScalarAggregate, TableAggregate};

/// Register every bespoke overload. Order within a name is the order
/// overloads are tried in.
pub(crate) fn register(registry: &mut FunctionRegistry) -> Result<(), RegistryError> {
    for aggregate in [Aggregate::Sum, Aggregate::Average, Aggregate::StdevP, Aggregate::VarP] {
        registry.register(ScalarAggregate::new(aggregate))?;
        registry.register(TableAggregate::new(aggregate))?;
    }
    for aggregate in [Aggregate::Min, Aggregate::Max] {
        registry.register(ScalarAggregate::new(aggregate))?;
        registry.register(DateTimeExtremum::scalar(aggregate))?;
        registry.register(TableAggregate::new(aggregate))?;
        registry.register(DateTimeExtremum::table(aggregate))?;
    }

    registry.register(count::CountRows)?;
    registry.register(count::Count)?;
    registry.register(reduce::Reduce)?;
    registry.register(types::AsType)?;
    registry.register(types::IsType)?;
    registry.register(types::ParseJson)?;
    registry.register(trace::Trace)?;
    registry.register(sequence::Sequence)?;
    registry.register(table::TableConstructor)?;
    registry.register(table::TableConcatenate)?;
    registry.register(collection::Clear)?;
    registry.register(collection::Collect)?;
    registry.register(pattern::IsMatch)?;
    Ok(())
}
