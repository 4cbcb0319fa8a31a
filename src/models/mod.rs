pub mod account;
pub mod category;
pub mod product;
pub mod user;

/// Overwrites `slot` when `value` differs, reporting whether it did.
pub(crate) fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}
