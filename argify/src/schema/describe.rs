//! `Describe` implementations for standard library types.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;

use serde_json::Value;

use super::{CustomType, DeclaredType, ScalarType};

/// Reports the [`DeclaredType`] of a Rust type.
///
/// Derive it for enums with `#[derive(argify::Describe)]`; structs deriving
/// [`Schema`](super::Schema) get it for free and describe themselves as a
/// nested record.
pub trait Describe {
    /// Type information handed to the shape classifier.
    fn declared_type() -> DeclaredType;
}

macro_rules! describe_scalar {
    ($scalar:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl Describe for $ty {
                fn declared_type() -> DeclaredType {
                    DeclaredType::Scalar(ScalarType::$scalar)
                }
            }
        )+
    };
}

describe_scalar!(Str => String, str);
describe_scalar!(Int => i8, i16, i32, i64, isize);
describe_scalar!(UInt => u8, u16, u32, u64, usize);
describe_scalar!(Float => f32, f64);
describe_scalar!(Bool => bool);
describe_scalar!(Char => char);
describe_scalar!(Path => PathBuf);
describe_scalar!(Json => Value);

macro_rules! describe_parsed {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl Describe for $ty {
                fn declared_type() -> DeclaredType {
                    DeclaredType::Scalar(ScalarType::Custom(CustomType::parsed::<$ty>(
                        stringify!($ty),
                    )))
                }
            }
        )+
    };
}

describe_parsed!(IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr);

impl<T: Describe> Describe for Vec<T> {
    fn declared_type() -> DeclaredType {
        DeclaredType::sequence(T::declared_type())
    }
}

impl<T: Describe> Describe for VecDeque<T> {
    fn declared_type() -> DeclaredType {
        DeclaredType::sequence(T::declared_type())
    }
}

impl<T: Describe, S> Describe for HashSet<T, S> {
    fn declared_type() -> DeclaredType {
        DeclaredType::set(T::declared_type())
    }
}

impl<T: Describe> Describe for BTreeSet<T> {
    fn declared_type() -> DeclaredType {
        DeclaredType::set(T::declared_type())
    }
}

impl<K: Describe, V: Describe, S> Describe for HashMap<K, V, S> {
    fn declared_type() -> DeclaredType {
        DeclaredType::Mapping {
            key: Box::new(K::declared_type()),
            value: Box::new(V::declared_type()),
        }
    }
}

impl<K: Describe, V: Describe> Describe for BTreeMap<K, V> {
    fn declared_type() -> DeclaredType {
        DeclaredType::Mapping {
            key: Box::new(K::declared_type()),
            value: Box::new(V::declared_type()),
        }
    }
}

impl<T: Describe> Describe for Option<T> {
    fn declared_type() -> DeclaredType {
        DeclaredType::optional(T::declared_type())
    }
}

impl<T: Describe + ?Sized> Describe for Box<T> {
    fn declared_type() -> DeclaredType {
        T::declared_type()
    }
}

impl Describe for () {
    fn declared_type() -> DeclaredType {
        DeclaredType::Null
    }
}

macro_rules! describe_tuple {
    ($($name:ident),+) => {
        impl<$($name: Describe),+> Describe for ($($name,)+) {
            fn declared_type() -> DeclaredType {
                DeclaredType::Tuple(vec![$($name::declared_type()),+])
            }
        }
    };
}

describe_tuple!(A);
describe_tuple!(A, B);
describe_tuple!(A, B, C);
describe_tuple!(A, B, C, D);
describe_tuple!(A, B, C, D, E);
describe_tuple!(A, B, C, D, E, F);
