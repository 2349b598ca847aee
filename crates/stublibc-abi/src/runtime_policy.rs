//! Runtime policy bridge for ABI entrypoints.
//!
//! Stubs do not carry their own return values or errno codes. They name
//! their [`Symbol`] and this module executes the table row: errno is stored
//! only when the row carries one, and the constant return value is converted
//! to the stub's C return type.

use stublibc_core::{Outcome, ReturnValue, Symbol, errno};

use crate::errno_abi::set_abi_errno;

/// Conversion from a table return value into a C return type.
pub trait FromReturnValue: Sized {
    fn from_return_value(ret: ReturnValue) -> Self;
}

macro_rules! int_from_return_value {
    ($($ty:ty),+) => {
        $(impl FromReturnValue for $ty {
            #[inline]
            fn from_return_value(ret: ReturnValue) -> Self {
                match ret {
                    ReturnValue::Int(v) => v as $ty,
                    ReturnValue::Null => 0,
                    ReturnValue::MapFailed => -1i64 as $ty,
                    ReturnValue::Text(text) => text.as_ptr() as usize as $ty,
                }
            }
        })+
    };
}

int_from_return_value!(i32, u32, i64, isize, usize);

impl<T> FromReturnValue for *mut T {
    #[inline]
    fn from_return_value(ret: ReturnValue) -> Self {
        match ret {
            ReturnValue::Int(v) => std::ptr::without_provenance_mut(v as usize),
            ReturnValue::Null => std::ptr::null_mut(),
            ReturnValue::MapFailed => libc::MAP_FAILED.cast(),
            ReturnValue::Text(text) => text.as_ptr().cast_mut().cast(),
        }
    }
}

impl<T> FromReturnValue for *const T {
    #[inline]
    fn from_return_value(ret: ReturnValue) -> Self {
        <*mut T>::from_return_value(ret).cast_const()
    }
}

impl FromReturnValue for () {
    #[inline]
    fn from_return_value(_: ReturnValue) -> Self {}
}

/// Resolve `symbol` for a call that asked for `requested` units.
///
/// Forwarding and freezing stubs never reach this; if one does, it fails
/// closed with `ENOSYS` rather than inventing a success.
#[inline]
#[must_use]
pub fn decide(symbol: Symbol, requested: usize) -> Outcome {
    match symbol.policy().outcome(requested) {
        Some(outcome) => outcome,
        None => {
            debug_assert!(false, "{} has no constant outcome", symbol.name());
            Outcome {
                ret: ReturnValue::Int(-1),
                errno: Some(errno::ENOSYS),
            }
        }
    }
}

/// Execute `outcome`: store its errno, hand back its return value.
#[inline]
pub fn observe<R: FromReturnValue>(outcome: Outcome) -> R {
    if let Some(code) = outcome.errno {
        set_abi_errno(code);
    }
    R::from_return_value(outcome.ret)
}

/// Execute the table row of a stub whose result does not depend on a count.
#[inline]
pub fn apply<R: FromReturnValue>(symbol: Symbol) -> R {
    observe(decide(symbol, 0))
}

/// Execute the table row of a stub that was asked to move `requested` units.
#[inline]
pub fn apply_counted<R: FromReturnValue>(symbol: Symbol, requested: usize) -> R {
    observe(decide(symbol, requested))
}
