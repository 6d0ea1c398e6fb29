//! Render targets: the container a panel draws into.

use parking_lot::Mutex;

/// A container whose content is replaced wholesale on every render.
pub trait RenderTarget: Send + Sync + 'static {
    /// Replace the full content.
    fn replace(&self, markup: &str);

    /// Replace the text of the element with `id="node_id"`.
    ///
    /// Returns false when no such element is present.
    fn patch(&self, node_id: &str, text: &str) -> bool;
}

/// Keeps rendered markup in memory.
#[derive(Debug, Default)]
pub struct MemoryTarget {
    inner: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    markup: String,
    history: Vec<String>,
}

impl MemoryTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current content, including any patches.
    pub fn markup(&self) -> String {
        self.inner.lock().markup.clone()
    }

    /// Every full replacement so far, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.inner.lock().history.clone()
    }
}

impl RenderTarget for MemoryTarget {
    fn replace(&self, markup: &str) {
        let mut state = self.inner.lock();
        state.markup = markup.to_string();
        state.history.push(markup.to_string());
    }

    fn patch(&self, node_id: &str, text: &str) -> bool {
        let mut state = self.inner.lock();
        match patch_text(&state.markup, node_id, text) {
            Some(patched) => {
                state.markup = patched;
                true
            }
            None => false,
        }
    }
}

/// Swap the text between the opening tag carrying `id="node_id"` and the
/// next tag.
fn patch_text(markup: &str, node_id: &str, text: &str) -> Option<String> {
    let marker = format!("id=\"{}\"", node_id);
    let attr = markup.find(&marker)?;
    let open_end = attr + markup[attr..].find('>')? + 1;
    let close = open_end + markup[open_end..].find('<')?;

    let mut patched = String::with_capacity(markup.len() + text.len());
    patched.push_str(&markup[..open_end]);
    patched.push_str(text);
    patched.push_str(&markup[close..]);
    Some(patched)
}
