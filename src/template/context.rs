// ABOUTME: Property resolution and layered scopes for template rendering
// ABOUTME: Resolves dotted paths against a context and overlays iteration frames without copying

use super::value::{Context, Value};

/// Resolve a dotted path such as `user.address.city` against a context.
///
/// Returns `None` ("undefined") as soon as a segment is missing or the
/// current value is not a mapping. That is an ordinary outcome, not an error.
pub fn resolve<'c>(context: &'c Context, path: &str) -> Option<&'c Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    walk(context.get(first)?, segments)
}

fn walk<'v, 's>(mut current: &'v Value, segments: impl Iterator<Item = &'s str>) -> Option<&'v Value> {
    for segment in segments {
        current = current.as_mapping()?.get(segment)?;
    }
    Some(current)
}

/// A chain of frames that together form the derived context of a block.
///
/// The root frame is the caller's context. Each `each` iteration pushes a
/// frame holding the item's own fields and the `@index`, `@first` and
/// `@last` metadata. Lookups start at the innermost frame, so the result is
/// the same as a shallow merge of outer fields, item fields and metadata.
#[derive(Debug)]
pub struct Scope<'a> {
    fields: Option<&'a Context>,
    metadata: Context,
    parent: Option<&'a Scope<'a>>,
}

impl<'a> Scope<'a> {
    pub fn root(context: &'a Context) -> Self {
        Self {
            fields: Some(context),
            metadata: Context::new(),
            parent: None,
        }
    }

    /// Frame for item `index` of a sequence of length `len`
    pub fn iteration(parent: &'a Scope<'a>, item: &'a Value, index: usize, len: usize) -> Self {
        let mut metadata = Context::with_capacity(3);
        metadata.insert("@index".to_string(), Value::from(index));
        metadata.insert("@first".to_string(), Value::Bool(index == 0));
        metadata.insert("@last".to_string(), Value::Bool(index + 1 == len));

        Self {
            fields: item.as_mapping(),
            metadata,
            parent: Some(parent),
        }
    }

    /// Resolve a dotted path through the frame chain
    pub fn resolve(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        walk(self.lookup(first)?, segments)
    }

    fn lookup(&self, name: &str) -> Option<&Value> {
        self.metadata
            .get(name)
            .or_else(|| self.fields.and_then(|fields| fields.get(name)))
            .or_else(|| self.parent.and_then(|parent| parent.lookup(name)))
    }
}
