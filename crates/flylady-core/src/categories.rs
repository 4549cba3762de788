//! Marketing categories and the keyword classifier.
//!
//! The catalog is fixed configuration, not feed data: seven categories in a
//! deliberate display order. Classification is first-match-wins across that
//! order, so a product matching keywords from two categories lands in
//! whichever category comes first and is never shown twice.

use std::collections::HashSet;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::products::Product;
use crate::text::fold_text;

/// One marketing category: display metadata plus the keywords that claim
/// products for it. Keywords are matched diacritic- and case-insensitively
/// as plain substrings, so a stem like `"vyhlidkov"` covers all inflections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub seo_text: String,
    pub keywords: Vec<String>,
}

/// A category together with the products claimed by it. May be empty.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryGroup {
    #[serde(flatten)]
    pub category: CategoryConfig,
    pub products: Vec<Product>,
}

/// Classifier output: one group per configured category plus the products no
/// category claimed, in their original order. Every input product appears in
/// exactly one place.
#[derive(Debug, Clone, Serialize)]
pub struct Classified {
    pub groups: Vec<CategoryGroup>,
    pub remaining: Vec<Product>,
}

/// Partitions products into the configured categories.
///
/// Categories are processed in catalog order; within a category, products
/// keep their input order. A claimed-id set threaded through the fold
/// guarantees cross-category exclusivity: once a product matches, later
/// categories skip it. Total over any product list: an empty input yields
/// all-empty groups and an empty `remaining`.
#[must_use]
pub fn classify(products: &[Product], catalog: &[CategoryConfig]) -> Classified {
    let mut claimed: HashSet<&str> = HashSet::new();

    let groups = catalog
        .iter()
        .map(|category| {
            let keywords: Vec<String> =
                category.keywords.iter().map(|k| fold_text(k)).collect();

            let matched: Vec<Product> = products
                .iter()
                .filter(|product| {
                    if claimed.contains(product.id.as_str()) {
                        return false;
                    }
                    let text = fold_text(&format!(
                        "{} {} {}",
                        product.name,
                        product.description,
                        product.categories.join(" ")
                    ));
                    let is_match = keywords.iter().any(|k| text.contains(k.as_str()));
                    if is_match {
                        claimed.insert(product.id.as_str());
                    }
                    is_match
                })
                .cloned()
                .collect();

            CategoryGroup {
                category: category.clone(),
                products: matched,
            }
        })
        .collect();

    let remaining = products
        .iter()
        .filter(|product| !claimed.contains(product.id.as_str()))
        .cloned()
        .collect();

    Classified { groups, remaining }
}

/// Looks up a category by its slug in the default catalog.
#[must_use]
pub fn category_by_slug(slug: &str) -> Option<&'static CategoryConfig> {
    category_catalog().iter().find(|c| c.slug == slug)
}

/// The site's category catalog, in display order.
#[must_use]
pub fn category_catalog() -> &'static [CategoryConfig] {
    static CATALOG: OnceLock<Vec<CategoryConfig>> = OnceLock::new();
    CATALOG.get_or_init(build_catalog)
}

fn category(
    slug: &str,
    title: &str,
    description: &str,
    seo_text: &str,
    keywords: &[&str],
) -> CategoryConfig {
    CategoryConfig {
        slug: slug.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        seo_text: seo_text.to_string(),
        keywords: keywords.iter().map(ToString::to_string).collect(),
    }
}

fn build_catalog() -> Vec<CategoryConfig> {
    vec![
        category(
            "letecke-simulatory",
            "Letecké simulátory",
            "Skvělý start pro budoucí piloty i fanoušky letectví.",
            "Letecké simulátory jsou ideální volbou pro všechny, kdo si chtějí vyzkoušet \
             pilotáž bez toho, aby opustili zem. Najdete tu moderní simulátory dopravních \
             letadel i vojenských strojů, realistické kokpity a zkušené instruktory, kteří \
             vás provedou prvními minutami letu. Skvělé jako dárek pro fanoušky letectví \
             nebo netradiční zážitek na víkend.",
            &["simulator", "simulátor", "simulator letu", "simulátor letu"],
        ),
        category(
            "vyhlidkove-lety",
            "Vyhlídkové lety",
            "Krásné výhledy a klidný let nad krajinou.",
            "Vyhlídkové lety patří mezi nejoblíbenější letecké zážitky. Užijete si \
             panoramata měst, řek, hor i historických památek a často si můžete vybrat \
             délku i trasu letu. Jsou skvělým dárkem pro páry i rodiny a díky klidnému \
             tempu jsou vhodné i pro úplné začátečníky.",
            &["vyhlidkov", "vyhlídkov", "panorama", "scenic"],
        ),
        category(
            "let-stihackou",
            "Let stíhačkou",
            "Adrenalinový zážitek pro ty, kdo chtějí výš a rychleji.",
            "Let stíhačkou je zážitek pro milovníky adrenalinu. Čeká vás dynamická \
             akrobacie, vysoké přetížení i rychlosti, které v běžném letadle nezažijete. \
             Pokud hledáte dárek pro někoho, kdo má rád výzvy, stíhačka bude trefa do \
             černého.",
            &["stihack", "stíhačk", "fighter", "mig", "l-39", "albatros"],
        ),
        category(
            "vetrny-tunel",
            "Větrný tunel",
            "Pocit volného pádu v bezpečí, vhodné i pro začátečníky.",
            "Větrný tunel vám dá pocit volného pádu bez nutnosti skákat z letadla. Je \
             ideální pro první seznámení s létáním, trénink stability a zábavu s přáteli. \
             Skvělé i pro děti a ty, kteří chtějí bezpečně zkusit, jaké je létat ve \
             vzduchu.",
            &["veterny tunel", "větrný tunel", "wind tunnel"],
        ),
        category(
            "tandemove-seskoky",
            "Tandemové seskoky",
            "Skok padákem s instruktorem a porce pravého adrenalinu.",
            "Tandemové seskoky jsou nejrychlejší cestou k nezapomenutelnému zážitku. \
             Instruktor se postará o vše důležité a vy si užijete volný pád i klidné \
             dosednutí. Pokud chcete překvapit někoho opravdu silným zážitkem, tandemový \
             seskok je sázka na jistotu.",
            &["tandem", "seskok", "skok", "padak", "padák"],
        ),
        category(
            "let-vrtulnikem",
            "Let vrtulníkem",
            "Pohled shora, který z letadla nezažijete.",
            "Let vrtulníkem nabídne úplně jinou perspektivu než letadlo. Díky možnosti \
             visení a nižším letovým výškám si vychutnáte detaily krajiny a měst. Skvělá \
             volba pro romantické lety i netradiční dárky.",
            &["vrtulnik", "vrtulník", "helikopt", "helikoptera"],
        ),
        category(
            "let-vzducholodi",
            "Let vzducholodí",
            "Elegantní zážitek s nejpomalejším výhledem na svět.",
            "Let vzducholodí je pomalý, tichý a neskutečně fotogenický. Pokud hledáte \
             klidný zážitek s výhledem, který si chcete vychutnat bez spěchu, vzducholoď \
             je ideální. Skvělá volba pro páry i milovníky netradičních letů.",
            &["vzducholod", "vzducholoď", "airship"],
        ),
    ]
}
