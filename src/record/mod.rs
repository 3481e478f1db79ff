//! Per-record-type descriptors.
//!
//! A [`Record`] lists its fields once, in declaration order, through a [`RecordDescriptor`].
//! Most callers declare record types with [`crate::record!`], which writes the descriptor from
//! the struct definition itself. Descriptors are built on first use and cached by type
//! (see [`descriptor_of`]).

mod descriptor;
mod macros;
#[doc(hidden)]
pub mod slot;

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

pub use descriptor::{FieldDescriptor, RecordDescriptor};
pub use crate::types::{FieldKind, FieldMeta, Visibility};

/// A struct-shaped type that can be encoded to and decoded from CSV records.
///
/// `Default` supplies the value each decoded record starts from; fields without a matching
/// column keep their default.
pub trait Record: Default + 'static {
    fn descriptor() -> RecordDescriptor<Self>;
}

type DescriptorCache = RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>;

static DESCRIPTORS: OnceLock<DescriptorCache> = OnceLock::new();

/// Cached descriptor for `T`, built with [`Record::descriptor`] the first time it is requested.
pub fn descriptor_of<T: Record>() -> Arc<RecordDescriptor<T>> {
    let cache = DESCRIPTORS.get_or_init(Default::default);
    let key = TypeId::of::<T>();

    let cached = cache.read().ok().and_then(|map| map.get(&key).cloned());
    if let Some(entry) = cached {
        if let Ok(descriptor) = entry.downcast::<RecordDescriptor<T>>() {
            return descriptor;
        }
    }

    let built = Arc::new(T::descriptor());
    if let Ok(mut map) = cache.write() {
        let entry = map
            .entry(key)
            .or_insert_with(|| Arc::clone(&built) as Arc<dyn Any + Send + Sync>);
        if let Ok(descriptor) = Arc::clone(entry).downcast::<RecordDescriptor<T>>() {
            return descriptor;
        }
    }
    built
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::{FieldDescriptor, Record, RecordDescriptor, descriptor_of};

    static BUILDS: AtomicUsize = AtomicUsize::new(0);

    #[derive(Default)]
    struct Counted {
        label: String,
    }

    impl Record for Counted {
        fn descriptor() -> RecordDescriptor<Self> {
            BUILDS.fetch_add(1, Ordering::SeqCst);
            RecordDescriptor::new("Counted").field(FieldDescriptor::<Self>::new(
                "label",
                |r| &r.label,
                |r| &mut r.label,
            ))
        }
    }

    #[test]
    fn descriptors_are_built_once_per_type() {
        let first = descriptor_of::<Counted>();
        let second = descriptor_of::<Counted>();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(BUILDS.load(Ordering::SeqCst), 1);
        assert_eq!(first.type_name(), "Counted");
        assert_eq!(first.fields()[0].name(), "label");
    }
}
