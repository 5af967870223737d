//! Dialogue graph data.
//!
//! A dialogue is an immutable set of nodes linked by `next_node_id` and by
//! choices. Walking it is the job of [`crate::dialogue::DialogueWalker`].

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DialogueData {
    pub name: String,
    /// Entry node; the first node when unset.
    #[cfg_attr(
        feature = "serde",
        serde(alias = "startNodeId", alias = "startnodeid", alias = "start")
    )]
    pub start_node_id: Option<String>,
    pub nodes: Vec<DialogueNode>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DialogueNode {
    pub id: String,
    pub speaker: String,
    pub text: String,
    pub choices: Vec<DialogueChoice>,
    #[cfg_attr(feature = "serde", serde(alias = "nextNodeId", alias = "nextnodeid"))]
    pub next_node_id: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "requiresFlag", alias = "requiresflag"))]
    pub requires_flag: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "setsFlag", alias = "setsflag"))]
    pub sets_flag: Option<String>,
    /// `key=value` assignment applied on entry.
    #[cfg_attr(feature = "serde", serde(alias = "setsVariable", alias = "setsvariable"))]
    pub sets_variable: Option<String>,
}

impl DialogueNode {
    pub fn new(id: impl Into<String>, speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            speaker: speaker.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_next(mut self, next: impl Into<String>) -> Self {
        self.next_node_id = Some(next.into());
        self
    }

    pub fn requiring(mut self, flag: impl Into<String>) -> Self {
        self.requires_flag = Some(flag.into());
        self
    }

    pub fn setting_flag(mut self, flag: impl Into<String>) -> Self {
        self.sets_flag = Some(flag.into());
        self
    }

    pub fn setting_variable(mut self, assignment: impl Into<String>) -> Self {
        self.sets_variable = Some(assignment.into());
        self
    }

    pub fn with_choice(mut self, choice: DialogueChoice) -> Self {
        self.choices.push(choice);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DialogueChoice {
    pub text: String,
    #[cfg_attr(feature = "serde", serde(alias = "nextNodeId", alias = "nextnodeid"))]
    pub next_node_id: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "requiresFlag", alias = "requiresflag"))]
    pub requires_flag: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "setsFlag", alias = "setsflag"))]
    pub sets_flag: Option<String>,
}

impl DialogueChoice {
    pub fn new(text: impl Into<String>, next: Option<&str>) -> Self {
        Self {
            text: text.into(),
            next_node_id: next.map(str::to_string),
            ..Self::default()
        }
    }

    pub fn requiring(mut self, flag: impl Into<String>) -> Self {
        self.requires_flag = Some(flag.into());
        self
    }

    pub fn setting_flag(mut self, flag: impl Into<String>) -> Self {
        self.sets_flag = Some(flag.into());
        self
    }
}

impl DialogueData {
    pub fn new(name: impl Into<String>, nodes: Vec<DialogueNode>) -> Self {
        Self {
            name: name.into(),
            start_node_id: None,
            nodes,
        }
    }

    /// Synthesizes a linear conversation from delimiter-joined text.
    ///
    /// Pages become `page_0`, `page_1`, ... each chained to the next, all
    /// spoken by `speaker`. Blank pages are dropped.
    pub fn inline(name: impl Into<String>, speaker: &str, text: &str, delimiter: &str) -> Self {
        let pages: Vec<&str> = if delimiter.is_empty() {
            vec![text.trim()]
        } else {
            text.split(delimiter).map(str::trim).collect()
        };
        let pages: Vec<&str> = pages.into_iter().filter(|page| !page.is_empty()).collect();

        let count = pages.len();
        let nodes = pages
            .into_iter()
            .enumerate()
            .map(|(index, page)| {
                let node = DialogueNode::new(format!("page_{}", index), speaker, page);
                if index + 1 < count {
                    node.with_next(format!("page_{}", index + 1))
                } else {
                    node
                }
            })
            .collect();

        Self::new(name, nodes)
    }

    pub fn node(&self, id: &str) -> Option<&DialogueNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn start_node(&self) -> Option<&str> {
        self.start_node_id
            .as_deref()
            .or_else(|| self.nodes.first().map(|node| node.id.as_str()))
    }
}

/// Keyed dialogue lookup.
pub trait DialogueOracle: Send + Sync {
    fn dialogue(&self, key: &str) -> Option<DialogueData>;
}
