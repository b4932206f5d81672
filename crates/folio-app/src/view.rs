#![forbid(unsafe_code)]

//! Pure view renderer.
//!
//! [`render_view`] projects the profile and catalog into a [`ViewTree`] for
//! one [`LayoutVariant`]. The tree describes structure only; the terminal
//! painter turns it into cells and the web host can mount it from JSON.
//! Nothing here performs side effects: a card's action is a value that a
//! host capability executes.

use crate::catalog::{Catalog, Icon, ProfileInfo, ProjectEntry};
use folio_layout::LayoutVariant;
use folio_runtime::{Cmd, UriOpener};
use serde::Serialize;

/// Heading above the project list.
pub const PROJECTS_HEADER: &str = "My Projects";
/// Caption inside a card's image placeholder.
pub const SCREENSHOT_CAPTION: &str = "Project Screenshot";
/// Label of a card's action control.
pub const ACTION_LABEL: &str = "View on GitHub";

const DESKTOP_PROFILE_PERCENT: u16 = 35;
const DESKTOP_PROJECTS_PERCENT: u16 = 65;
const DESKTOP_PADDING_DP: u16 = 32;
const MOBILE_PADDING_DP: u16 = 16;
const ITEM_SPACING_DP: u16 = 24;

/// What activating a card does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "uri", rename_all = "snake_case")]
pub enum CardAction {
    OpenUri(String),
}

impl CardAction {
    /// Hand the action to the host capability. Calls it exactly once.
    pub fn activate(&self, opener: &mut dyn UriOpener) {
        match self {
            CardAction::OpenUri(uri) => opener.open_uri(uri),
        }
    }

    /// The same action as a runtime command.
    pub fn to_cmd<M>(&self) -> Cmd<M> {
        match self {
            CardAction::OpenUri(uri) => Cmd::OpenUri(uri.clone()),
        }
    }

    pub fn uri(&self) -> &str {
        match self {
            CardAction::OpenUri(uri) => uri,
        }
    }
}

/// One project card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    /// Position in the catalog.
    pub index: usize,
    pub icon: Icon,
    pub image_caption: String,
    pub title: String,
    pub description: String,
    /// Non-interactive, horizontally scrollable chips.
    pub tags: Vec<String>,
    pub action_label: String,
    pub action: CardAction,
}

impl CardView {
    fn from_entry(index: usize, entry: &ProjectEntry) -> Self {
        Self {
            index,
            icon: entry.icon,
            image_caption: SCREENSHOT_CAPTION.to_string(),
            title: entry.title.clone(),
            description: entry.description.clone(),
            tags: entry.tags.clone(),
            action_label: ACTION_LABEL.to_string(),
            action: CardAction::OpenUri(entry.repository_url.clone()),
        }
    }
}

/// The profile block: avatar, greeting, role, bio and skill chips, centred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileView {
    pub avatar: Icon,
    pub greeting: String,
    pub role: String,
    pub bio: String,
    pub skills: Vec<String>,
}

impl From<&ProfileInfo> for ProfileView {
    fn from(profile: &ProfileInfo) -> Self {
        Self {
            avatar: profile.avatar,
            greeting: profile.greeting.clone(),
            role: profile.role.clone(),
            bio: profile.bio.clone(),
            skills: profile.skills.clone(),
        }
    }
}

/// A vertical run of nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnView {
    pub scrollable: bool,
    /// Centre the content vertically when it is shorter than the viewport.
    pub center_vertically: bool,
    pub padding_dp: u16,
    /// Space between consecutive children.
    pub spacing_dp: u16,
    pub children: Vec<ViewNode>,
}

/// One side of a split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    /// Share of the total width.
    pub width_percent: u16,
    pub column: ColumnView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewNode {
    Split { left: Region, right: Region },
    Column(ColumnView),
    Spacer { height_dp: u16 },
    Divider,
    SectionHeader { text: String },
    Profile(ProfileView),
    Card(CardView),
}

impl ViewNode {
    fn collect_cards<'a>(&'a self, out: &mut Vec<&'a CardView>) {
        match self {
            ViewNode::Split { left, right } => {
                for child in left.column.children.iter().chain(&right.column.children) {
                    child.collect_cards(out);
                }
            }
            ViewNode::Column(column) => {
                for child in &column.children {
                    child.collect_cards(out);
                }
            }
            ViewNode::Card(card) => out.push(card),
            ViewNode::Spacer { .. }
            | ViewNode::Divider
            | ViewNode::SectionHeader { .. }
            | ViewNode::Profile(_) => {}
        }
    }
}

/// The rendered page for one layout variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewTree {
    pub layout: LayoutVariant,
    pub root: ViewNode,
}

impl ViewTree {
    /// Cards in display order.
    pub fn cards(&self) -> Vec<&CardView> {
        let mut cards = Vec::new();
        self.root.collect_cards(&mut cards);
        cards
    }

    pub fn card(&self, index: usize) -> Option<&CardView> {
        self.cards().into_iter().find(|card| card.index == index)
    }

    /// # Errors
    ///
    /// Propagates serialisation failures.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Project the profile and catalog into a view tree.
///
/// Pure: equal inputs give equal trees, and cards follow catalog order.
pub fn render_view(profile: &ProfileInfo, catalog: &Catalog, layout: LayoutVariant) -> ViewTree {
    let header = ViewNode::SectionHeader {
        text: PROJECTS_HEADER.to_string(),
    };
    let cards = catalog
        .iter()
        .enumerate()
        .map(|(index, entry)| ViewNode::Card(CardView::from_entry(index, entry)));

    let root = match layout {
        LayoutVariant::Desktop => ViewNode::Split {
            left: Region {
                width_percent: DESKTOP_PROFILE_PERCENT,
                column: ColumnView {
                    scrollable: false,
                    center_vertically: true,
                    padding_dp: DESKTOP_PADDING_DP,
                    spacing_dp: 0,
                    children: vec![ViewNode::Profile(profile.into())],
                },
            },
            right: Region {
                width_percent: DESKTOP_PROJECTS_PERCENT,
                column: ColumnView {
                    scrollable: true,
                    center_vertically: false,
                    padding_dp: DESKTOP_PADDING_DP,
                    spacing_dp: ITEM_SPACING_DP,
                    children: std::iter::once(header).chain(cards).collect(),
                },
            },
        },
        LayoutVariant::Mobile => {
            // Profile through header form one list item; item spacing
            // applies only between it, the cards and the trailing spacer.
            let intro = ViewNode::Column(ColumnView {
                scrollable: false,
                center_vertically: false,
                padding_dp: 0,
                spacing_dp: 0,
                children: vec![
                    ViewNode::Spacer { height_dp: 32 },
                    ViewNode::Profile(profile.into()),
                    ViewNode::Spacer { height_dp: 32 },
                    ViewNode::Divider,
                    ViewNode::Spacer { height_dp: 16 },
                    header,
                ],
            });
            let mut children = vec![intro];
            children.extend(cards);
            children.push(ViewNode::Spacer { height_dp: 64 });
            ViewNode::Column(ColumnView {
                scrollable: true,
                center_vertically: false,
                padding_dp: MOBILE_PADDING_DP,
                spacing_dp: ITEM_SPACING_DP,
                children,
            })
        }
    };

    ViewTree { layout, root }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PortfolioContent;
    use folio_runtime::RecordingUriOpener;

    fn kinds(nodes: &[ViewNode]) -> Vec<&'static str> {
        nodes
            .iter()
            .map(|node| match node {
                ViewNode::Spacer { .. } => "spacer",
                ViewNode::Profile(_) => "profile",
                ViewNode::Divider => "divider",
                ViewNode::SectionHeader { .. } => "header",
                ViewNode::Card(_) => "card",
                ViewNode::Split { .. } | ViewNode::Column(_) => "nested",
            })
            .collect()
    }

    fn single() -> (ProfileInfo, Catalog) {
        let content = PortfolioContent::builtin();
        let catalog =
            Catalog::new(vec![ProjectEntry::new("A", "desc", "https://a").tags(["x", "y"])]).unwrap();
        (content.profile, catalog)
    }

    #[test]
    fn desktop_is_split_35_65() {
        let (profile, catalog) = single();
        let tree = render_view(&profile, &catalog, LayoutVariant::Desktop);
        let ViewNode::Split { left, right } = &tree.root else {
            panic!("expected split, got {:?}", tree.root);
        };
        assert_eq!((left.width_percent, right.width_percent), (35, 65));
        assert!(!left.column.scrollable);
        assert!(left.column.center_vertically);
        assert!(right.column.scrollable);
        assert!(matches!(&right.column.children[0], ViewNode::SectionHeader { text } if text == "My Projects"));
    }

    #[test]
    fn mobile_is_single_scrolling_column() {
        let (profile, catalog) = single();
        let tree = render_view(&profile, &catalog, LayoutVariant::Mobile);
        let ViewNode::Column(column) = &tree.root else {
            panic!("expected column");
        };
        assert!(column.scrollable);
        assert_eq!(column.spacing_dp, 24);
        assert_eq!(kinds(&column.children), ["nested", "card", "spacer"]);
    }

    #[test]
    fn mobile_intro_is_one_unspaced_item() {
        let (profile, catalog) = single();
        let tree = render_view(&profile, &catalog, LayoutVariant::Mobile);
        let ViewNode::Column(column) = &tree.root else {
            panic!("expected column");
        };
        let ViewNode::Column(intro) = &column.children[0] else {
            panic!("expected intro column, got {:?}", column.children[0]);
        };
        assert_eq!(intro.spacing_dp, 0);
        assert!(!intro.scrollable);
        assert_eq!(
            kinds(&intro.children),
            ["spacer", "profile", "spacer", "divider", "spacer", "header"]
        );
        assert_eq!(column.children[2], ViewNode::Spacer { height_dp: 64 });
    }

    #[test]
    fn card_content() {
        let (profile, catalog) = single();
        let tree = render_view(&profile, &catalog, LayoutVariant::Desktop);
        let cards = tree.cards();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "A");
        assert_eq!(cards[0].tags, ["x", "y"]);
        assert_eq!(cards[0].action_label, "View on GitHub");
        assert_eq!(cards[0].image_caption, "Project Screenshot");
        assert_eq!(cards[0].action, CardAction::OpenUri("https://a".into()));
    }

    #[test]
    fn activate_calls_opener_once() {
        let mut opener = RecordingUriOpener::new();
        CardAction::OpenUri("https://a".into()).activate(&mut opener);
        assert_eq!(opener.requests(), ["https://a"]);
    }

    #[test]
    fn action_as_command() {
        let action = CardAction::OpenUri("https://a".into());
        assert_eq!(action.to_cmd::<()>(), Cmd::OpenUri("https://a".into()));
        assert_eq!(action.uri(), "https://a");
    }

    #[test]
    fn json_tags_node_kinds() {
        let (profile, catalog) = single();
        let json = render_view(&profile, &catalog, LayoutVariant::Mobile)
            .to_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["layout"], "mobile");
        assert_eq!(value["root"]["kind"], "column");
        assert_eq!(value["root"]["children"][0]["kind"], "column");
        assert_eq!(value["root"]["children"][1]["kind"], "card");
        assert_eq!(value["root"]["children"][1]["action"]["kind"], "open_uri");
        assert_eq!(value["root"]["children"][1]["action"]["uri"], "https://a");
        assert_eq!(value["root"]["children"][1]["icon"], "code");
    }
}
