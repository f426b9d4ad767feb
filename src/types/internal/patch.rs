use poem_openapi::types::MaybeUndefined;

/// Collapse a PATCH field into "leave alone" (`None`) or "set to" (`Some`)
pub fn nullable<T>(value: MaybeUndefined<T>) -> Option<Option<T>> {
    match value {
        MaybeUndefined::Undefined => None,
        MaybeUndefined::Null => Some(None),
        MaybeUndefined::Value(value) => Some(Some(value)),
    }
}
