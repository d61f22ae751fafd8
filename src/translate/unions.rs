//! Untagged union emulation.
//!
//! A C union becomes a storage slot typed over the variant list with an
//! unchecked, type-indexed accessor. No discriminant is stored; as in the
//! native library, the caller asserts which variant is live, and reading
//! any other variant is undefined behavior by contract.

use crate::ident::drop_prefix;
use crate::types::map_base;
use regex::Regex;
use std::sync::LazyLock;

static RE_UNION_MEMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^    (\w+) (\w+)(?:\[(\d+)\])?.*?$").unwrap());

pub fn translate(name: &str, body: &str) -> String {
    let mut members = String::new();
    for caps in RE_UNION_MEMBER.captures_iter(body) {
        let base = map_base(&caps[1]);
        let variant = match caps.get(3) {
            Some(extent) => format!("InlineArray[{}, {}]", base, extent.as_str()),
            None => base,
        };
        members.push_str(&format!("    {}, `, `,\n", drop_prefix(&variant)));
    }
    let members = match members.strip_suffix(" `, `,\n") {
        Some(trimmed) => trimmed.to_string(),
        None => members,
    };
    format!(
        "  \nstruct {}:\n    alias _mlir_type = __mlir_type[`!pop.union<`, \n{}\n    `>`]\n    var _impl: Self._mlir_type\n\n    @implicit\n    fn __init__[T: AnyType](out self, value: T):\n        self._impl = rebind[Self._mlir_type](value)\n\n    fn __getitem__[T: AnyType](ref self) -> ref [self] T:\n        return rebind[Ptr[T]](Ptr(to=self._impl))[]\n",
        drop_prefix(name),
        members
    )
}
