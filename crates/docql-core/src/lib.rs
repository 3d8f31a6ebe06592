//! # docql-core
//!
//! A small document engine: a recursive-descent parser for a JSON-like text
//! format, and relational-style operators over collections of the parsed
//! documents.
//!
//! The two halves are independent. The caller reads text, hands it to
//! [`parse`], turns the result into a [`Collection`], and chains operators.
//! Every operator borrows its input and returns a new collection, so the same
//! collection can feed any number of queries.
//!
//! ## Quick start
//!
//! ```rust
//! use docql_core::{filter, group_aggregate, parse, project, Aggregate, CompareOp, Value};
//!
//! let text = r#"{"businesses": [
//!     {"name": "Dog House", "rating": 4.5, "price": "$"},
//!     {"name": "Taco Cart", "rating": 3.5, "price": "$"},
//!     {"name": "Steak Co", "rating": 4.0, "price": "$$$"}
//! ]}"#;
//! let docs = parse(text).unwrap().into_collection(Some("businesses")).unwrap();
//!
//! let good = filter(&docs, "rating", CompareOp::Ge, &Value::from(4.0)).unwrap();
//! let names = project(&good, &["name"]);
//! assert_eq!(names.len(), 2);
//!
//! let by_price = group_aggregate(&docs, "price", Aggregate::Count, "name");
//! assert_eq!(by_price.len(), 2);
//! ```
//!
//! ## Modules
//!
//! - [`parser`] — text → [`Value`] (`parse`, `parse_with`, `ParseOptions`)
//! - [`encoder`] — [`Value`] → canonical text
//! - [`value`] — `Value`, `Number`, `Map`, `Document`, `Collection`
//! - [`compare`] — equality/ordering rules and `CompareOp`
//! - [`filter`], [`project`], [`group`], [`aggregate`], [`join`] — operators
//! - [`error`] — `SyntaxError`, `QueryError`

mod cursor;

pub mod aggregate;
pub mod compare;
pub mod encoder;
pub mod error;
pub mod filter;
pub mod group;
pub mod join;
pub mod parser;
pub mod project;
pub mod value;

pub use aggregate::{
    aggregate_avg, aggregate_count, aggregate_max, aggregate_min, aggregate_sum, group_aggregate,
    group_summary, Aggregate,
};
pub use compare::{compare, values_equal, CompareOp};
pub use error::{Error, QueryError, Result, SyntaxError};
pub use filter::filter;
pub use group::{group_by, Group, GroupKey, Groups};
pub use join::join;
pub use parser::{parse, parse_with, ParseOptions};
pub use project::project;
pub use value::{Collection, Document, Map, Number, Value};
