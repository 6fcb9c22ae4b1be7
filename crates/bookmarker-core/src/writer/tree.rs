//! Groups bookmarks into nested folders, keeping first-seen order.

use crate::bookmark::Bookmark;

/// A folder and its contents. The root node has an empty name.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FolderNode<'a> {
    pub name: String,
    pub folders: Vec<FolderNode<'a>>,
    pub bookmarks: Vec<&'a Bookmark>,
}

impl<'a> FolderNode<'a> {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    fn child_mut(&mut self, name: &str) -> &mut FolderNode<'a> {
        let idx = match self.folders.iter().position(|f| f.name == name) {
            Some(i) => i,
            None => {
                tracing::trace!("creating folder node {:?}", name);
                self.folders.push(FolderNode::named(name));
                self.folders.len() - 1
            }
        };
        &mut self.folders[idx]
    }
}

/// Builds the folder tree in input order.
pub fn build_tree(bookmarks: &[Bookmark]) -> FolderNode<'_> {
    let mut root = FolderNode::default();
    for bm in bookmarks {
        let mut node = &mut root;
        for name in &bm.folders {
            node = node.child_mut(name);
        }
        node.bookmarks.push(bm);
    }
    root
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bm(folders: &[&str], url: &str) -> Bookmark {
        Bookmark {
            url: url.to_string(),
            title: url.to_string(),
            favicon: None,
            folders: folders.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn groups_by_folder_in_first_seen_order() {
        let list = vec![
            bm(&["News"], "https://lwn.net/"),
            bm(&[], "https://example.com/"),
            bm(&["Dev", "Rust"], "https://docs.rs/"),
            bm(&["News"], "https://news.ycombinator.com/"),
            bm(&["Dev"], "https://github.com/"),
        ];
        let root = build_tree(&list);
        assert_eq!(root.bookmarks.len(), 1);
        let names: Vec<&str> = root.folders.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["News", "Dev"]);
        assert_eq!(root.folders[0].bookmarks.len(), 2);
        assert_eq!(root.folders[0].bookmarks[1].url, "https://news.ycombinator.com/");
        let dev = &root.folders[1];
        assert_eq!(dev.bookmarks.len(), 1);
        assert_eq!(dev.folders.len(), 1);
        assert_eq!(dev.folders[0].name, "Rust");
        assert_eq!(dev.folders[0].bookmarks[0].url, "https://docs.rs/");
    }

    #[test]
    fn empty_input_gives_empty_root() {
        assert_eq!(build_tree(&[]), FolderNode::default());
    }
}
