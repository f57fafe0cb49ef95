//! Parser unit tests, grouped by language feature

mod test_arithmetic_operators;
mod test_call_member;
mod test_object_literals;
