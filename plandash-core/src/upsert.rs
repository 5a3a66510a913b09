//! Insert-or-replace on id-keyed collections.
//!
//! Collections are small (user-entered data), so every operation is a linear
//! scan and returns a new `Vec` instead of editing shared state.

/// A record addressed by an opaque string id.
pub trait Keyed {
    fn id(&self) -> &str;
}

/// Replace the element with `item`'s id in place, or append `item` if the id
/// is new.
pub fn upsert<T: Keyed>(collection: Vec<T>, item: T) -> Vec<T> {
    let mut collection = collection;
    match collection.iter().position(|entry| entry.id() == item.id()) {
        Some(idx) => collection[idx] = item,
        None => collection.push(item),
    }
    collection
}

/// Drop the element with the given id. Unknown ids leave the collection as is.
pub fn remove_by_id<T: Keyed>(collection: Vec<T>, id: &str) -> Vec<T> {
    collection.into_iter().filter(|entry| entry.id() != id).collect()
}

/// Apply `f` to the element with the given id, keeping its position.
pub fn update_by_id<T, F>(collection: Vec<T>, id: &str, f: F) -> Vec<T>
where
    T: Keyed,
    F: FnOnce(T) -> T,
{
    let mut f = Some(f);
    collection
        .into_iter()
        .map(|entry| {
            if entry.id() == id {
                match f.take() {
                    Some(f) => f(entry),
                    None => entry,
                }
            } else {
                entry
            }
        })
        .collect()
}
