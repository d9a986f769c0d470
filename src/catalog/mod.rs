//! Fixed option lists the wizard offers. Every choice and tag field draws its
//! values from one of these.

pub const GENDERS: &[&str] = &["Woman", "Man", "Unspecified"];

pub const AGE_BRACKETS: &[&str] = &["0-12", "13-17", "18-25", "26-35", "36-45", "46+"];

pub const PROFESSIONS: &[&str] = &[
    "Student", "Teacher", "Software Developer", "Doctor", "Engineer", "Lawyer", "Artist",
    "Shopkeeper", "Manager", "Marketer", "Human Resources", "Finance", "Architect",
    "Designer", "Entrepreneur", "Athlete", "Freelancer", "Retired", "Other",
];

/// Recipient value that requires a family-member subtype.
pub const FAMILY_RECIPIENT: &str = "Family";

pub const RECIPIENTS: &[&str] = &["Partner", "Friend", FAMILY_RECIPIENT, "Colleague"];

pub const FAMILY_MEMBERS: &[&str] = &["Mother", "Father", "Sister", "Brother", "Spouse", "Child"];

pub const OCCASIONS: &[&str] = &["Birthday", "New Year", "Anniversary", "Celebration", "Just Because"];

pub const INTERESTS: &[&str] = &[
    "Books", "Film/TV", "Music", "Sports", "Coffee / Tea", "Yoga / Meditation",
    "Tech / Gaming", "Travel", "Home Decor", "Animals", "Fashion", "History", "Automotive",
    "Cooking", "Gourmet Food", "Gardening", "Photography", "Hiking", "Board Games", "Art",
    "Science & Discovery", "Collecting", "Crafts / DIY", "Spirituality",
    "Personal Growth", "Eco Living",
];

pub const STYLES: &[&str] = &[
    "Fun", "Minimalist", "Nostalgic", "Practical", "Surprising", "Luxury", "Bohemian",
    "Sporty/Casual", "Classic",
];

pub const GIFT_TYPES: &[&str] = &["Physical product", "Digital product", "Experience", "Gift Box"];

/// Multi-select fields of the answer set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagField {
    Interests,
    Styles,
    GiftType,
}

impl TagField {
    pub fn name(self) -> &'static str {
        match self {
            TagField::Interests => "interests",
            TagField::Styles => "styles",
            TagField::GiftType => "giftType",
        }
    }
}

pub fn catalog_for(field: TagField) -> &'static [&'static str] {
    match field {
        TagField::Interests => INTERESTS,
        TagField::Styles => STYLES,
        TagField::GiftType => GIFT_TYPES,
    }
}

pub fn contains(catalog: &[&str], value: &str) -> bool {
    catalog.iter().any(|c| *c == value)
}
