#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Identifiers declared directly inside one lexical scope,
/// in declaration order.
/// Optimized for a small number of entries, so lookups are a linear scan.
pub struct ScopeFrame {
    ids: Vec<String>,
}

impl ScopeFrame {
    pub fn new() -> Self {
        ScopeFrame::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|n| n == id)
    }

    /// Records `id` as declared in this frame.
    /// Callers check [ScopeFrame::contains] first, a frame never holds duplicates.
    pub fn push(&mut self, id: &str) {
        debug_assert!(!self.contains(id));
        self.ids.push(id.to_string());
    }

    /// Identifiers in declaration order.
    pub fn ids(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Stack of open scopes. The last frame is the innermost scope.
#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
    frames: Vec<ScopeFrame>,
}

impl ScopeStack {
    pub fn new() -> Self {
        ScopeStack::default()
    }

    pub fn push(&mut self) {
        self.frames.push(ScopeFrame::new());
    }

    /// Removes the innermost frame, handing it back so its
    /// identifiers can be unwound from the index.
    pub fn pop(&mut self) -> Option<ScopeFrame> {
        self.frames.pop()
    }

    pub fn top(&self) -> Option<&ScopeFrame> {
        self.frames.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut ScopeFrame> {
        self.frames.last_mut()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames from outermost to innermost.
    pub fn frames(&self) -> impl Iterator<Item = &ScopeFrame> {
        self.frames.iter()
    }
}
