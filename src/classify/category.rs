/// Output bucket for an exported object.
///
/// Each variant maps to one subdirectory under the output root; `as_str`
/// returns that directory name.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Category {
    Technique,
    Tactics,
    Software,
    Groups,
    IntrusionSet,
    Datasource,
    Campaign,
    DataComponent,
    Relationships,
}

impl Category {
    /// Every category, in the order directories are prepared.
    pub const ALL: [Category; 9] = [
        Category::Technique,
        Category::Tactics,
        Category::Software,
        Category::Groups,
        Category::IntrusionSet,
        Category::Datasource,
        Category::Campaign,
        Category::DataComponent,
        Category::Relationships,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Technique => "technique",
            Category::Tactics => "tactics",
            Category::Software => "software",
            Category::Groups => "groups",
            Category::IntrusionSet => "intrusion-set",
            Category::Datasource => "datasource",
            Category::Campaign => "campaign",
            Category::DataComponent => "data-component",
            Category::Relationships => "relationships",
        }
    }

    /// Label used for the once-per-category progress notice.
    pub fn notice_label(&self) -> &'static str {
        match self {
            Category::Technique => "Technique",
            Category::Tactics => "Tactic",
            Category::Software => "Software",
            Category::Groups => "Group",
            Category::IntrusionSet => "APT",
            Category::Datasource => "Datasource",
            Category::Campaign => "Campaign",
            Category::DataComponent => "Data-Component",
            Category::Relationships => "Relationship",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_names_match_output_layout() {
        let names: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
        assert_eq!(
            names,
            vec![
                "technique",
                "tactics",
                "software",
                "groups",
                "intrusion-set",
                "datasource",
                "campaign",
                "data-component",
                "relationships",
            ]
        );
    }
}
