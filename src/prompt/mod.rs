use crate::cli::Flow;
use crate::form::{AnswerSet, Budget};
use crate::wire::NOT_SPECIFIED;

const UNSPECIFIED: &str = "unspecified";

pub const TRENDYOL_SEARCH: &str = "https://www.trendyol.com/sr?q=";
pub const AMAZON_TR_SEARCH: &str = "https://www.amazon.com.tr/s?k=";
pub const HEPSIBURADA_SEARCH: &str = "https://www.hepsiburada.com/ara?q=";

fn or_unspecified(s: &str) -> &str {
    if s.trim().is_empty() { UNSPECIFIED } else { s }
}

fn list_or_unspecified(items: &[String]) -> String {
    if items.is_empty() { UNSPECIFIED.to_string() } else { items.join(", ") }
}

fn notes_or_none(s: &str) -> &str {
    if s.trim().is_empty() { "none" } else { s }
}

pub fn budget_clause(budget: &Budget) -> String {
    match (budget.min, budget.max) {
        (Some(min), Some(max)) => format!("between {min} TL and {max} TL"),
        (Some(min), None) => format!("above {min} TL"),
        (None, Some(max)) => format!("below {max} TL"),
        (None, None) => UNSPECIFIED.to_string(),
    }
}

fn image_request(answers: &AnswerSet, flow: Flow) -> &'static str {
    if answers.image.is_none() {
        return "";
    }
    match flow {
        Flow::Gift => "Also analyze the attached photo. Let the style, colors, objects and overall mood of the person or setting in the photo inspire the gift choice.",
        Flow::Activity => "Also analyze the attached photo. Let the style, colors, objects and overall mood of the person or setting in the photo inspire the activity choice.",
    }
}

/// The three storefront search URLs for a product query.
pub fn storefront_links(query: &str) -> [String; 3] {
    let q = urlencoding::encode(query);
    [
        format!("{TRENDYOL_SEARCH}{q}"),
        format!("{AMAZON_TR_SEARCH}{q}"),
        format!("{HEPSIBURADA_SEARCH}{q}"),
    ]
}

pub fn build_gift_prompt(a: &AnswerSet) -> String {
    format!(
"Create gift suggestions for a gift recipient. About the recipient:
- For: {recipient}, Gender: {gender}, Age: {age}, Profession: {profession}
- Occasion: {occasion}
- Interests: {interests}
- Style: {styles}
- Color preference: {color}
- Gift type: {gift_type}
- Budget: {budget}
- Extra notes: {notes}.
{image}

Based on this information, offer 5 creative, personal gift suggestions. For each suggestion give:
1. The name of the gift (\"giftName\").
2. A short description introducing the gift (\"description\").
3. A personal reason why this person would love it (\"reason\").
4. The gift category (\"category\", e.g. \"Electronics\", \"Fashion\", \"Books\", \"Experience\").
5. An estimated price range that fits the stated budget (\"priceRange\", e.g. '800-1200 TL').
6. An image search query for finding the gift (\"imageQuery\", in English and effective).
7. Full URLs that search for the suggested gift directly on Trendyol, Amazon Turkey and Hepsiburada (\"trendyolLink\", \"amazonLink\", \"hepsiburadaLink\"). The URLs must have the form \"{trendyol}...\", \"{amazon}...\", \"{hepsiburada}...\" and the search term must be URL-encoded.",
        recipient = a.recipient_label(),
        gender = a.gender,
        age = a.age,
        profession = or_unspecified(&a.profession),
        occasion = a.occasion,
        interests = list_or_unspecified(&a.interests),
        styles = list_or_unspecified(&a.styles),
        color = or_unspecified(&a.color),
        gift_type = list_or_unspecified(&a.gift_type),
        budget = budget_clause(&a.budget),
        notes = notes_or_none(&a.notes),
        image = image_request(a, Flow::Gift),
        trendyol = TRENDYOL_SEARCH,
        amazon = AMAZON_TR_SEARCH,
        hepsiburada = HEPSIBURADA_SEARCH,
    )
}

pub fn build_activity_prompt(a: &AnswerSet) -> String {
    format!(
"You are an expert event planner who creates unforgettable experiences. Based on the user's input, create at least 5 personalized activity or event suggestions. Use Google Search to find real, current events such as concerts, plays, workshops or festivals around the given city and date.

User input:
- For: {recipient}
- Gender: {gender}, Age: {age}, Profession: {profession}
- Interests: {interests}
- Style: {styles}
- Notes: {notes}
- City: {city}
- Date: {date}
{image}

Your task is to offer creative and fitting suggestions. For each suggestion give:
1. A memorable name for the activity (\"activityName\").
2. An engaging description (\"description\").
3. A personalized reason why this person would enjoy it (\"reason\").
4. A category for the activity (e.g. \"Culture & Art\", \"Food & Drink\", \"Adventure\", \"Workshop\", \"Trip\") (\"category\").
5. An estimated price or price range if known (\"price\", e.g. \"150 TL\", \"500-800 TL\", \"Free\").
6. A link where tickets can be bought directly if available (\"ticketLink\", e.g. Biletix, Passo, Biletino), otherwise a link to the event's detail page (\"link\"). Links must be full URLs.

IMPORTANT: The whole response MUST be ONLY a valid JSON array string. Do not add any text before or after the JSON array. The JSON must be an array of objects, each following the structure above. If price or ticket link information is not available, use the value \"{not_specified}\" for those fields.",
        recipient = a.recipient_label(),
        gender = a.gender,
        age = a.age,
        profession = or_unspecified(&a.profession),
        interests = list_or_unspecified(&a.interests),
        styles = list_or_unspecified(&a.styles),
        notes = notes_or_none(&a.notes),
        city = a.city,
        date = a.date,
        image = image_request(a, Flow::Activity),
        not_specified = NOT_SPECIFIED,
    )
}
