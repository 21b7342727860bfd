//! Rule tables for boilerplate detection.
//!
//! All multilingual phrase tables, class/id token lists and image token lists
//! live here as plain data. [`RuleTables`] is the serializable form (hosts can
//! load an extended copy from JSON); [`CompiledRules`] holds the regexes built
//! from it once, and is what the classifier, locator and resolver consume.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Plain rule data. Token lists are matched against class/id values with
/// `-`, `_` and whitespace acting as word boundaries; pattern lists are
/// case-insensitive regular expressions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleTables {
    /// Class/id tokens marking navigation, ads, comments, related content,
    /// paywalls, newsletters, course/product CTAs, accordions and share bars.
    pub excluded_class_tokens: Vec<String>,
    /// Class/id patterns marking a clear advertisement container.
    pub ad_container_patterns: Vec<String>,
    /// "Read more", "related posts", paywall prompts and similar navigation
    /// phrasing, one pattern per language group.
    pub navigation_patterns: Vec<String>,
    /// Donation and newsletter solicitation phrasing.
    pub solicitation_patterns: Vec<String>,
    /// Keywords that turn a price mention into a course advert.
    pub course_keywords: Vec<String>,
    /// Metadata lines: word counts, reading time, "Edited by", short bylines.
    pub metadata_line_patterns: Vec<String>,
    /// Headings that always introduce boilerplate (compared case-insensitively).
    pub boilerplate_headings: Vec<String>,
    /// Heading prefixes that introduce boilerplate.
    pub boilerplate_heading_prefixes: Vec<String>,
    /// "Useful resources" style headings.
    pub resource_heading_patterns: Vec<String>,
    /// "Meet <product>" style headings.
    pub product_heading_patterns: Vec<String>,
    /// "Video training/course" style headings.
    pub training_heading_patterns: Vec<String>,
    /// Guarantee / call-to-buy phrasing that follows an advert heading.
    pub guarantee_patterns: Vec<String>,
    /// Class tokens of icon fonts and decorative glyph wrappers.
    pub icon_class_tokens: Vec<String>,
    /// Class/id pattern suggesting a main-content container.
    pub content_class_pattern: String,
    /// Class/id tokens of newsletter widgets and marketing-cloud forms.
    pub marketing_class_tokens: Vec<String>,
    /// Phrasing that makes an email input a newsletter form.
    pub newsletter_patterns: Vec<String>,
    /// Class tokens of collapsible or related sections whose headings are dropped.
    pub accordion_class_tokens: Vec<String>,
    /// Logo/brand/social tokens marking decorative images.
    pub logo_tokens: Vec<String>,
    /// Class/id tokens of author headshots and byline thumbnails.
    pub headshot_tokens: Vec<String>,
    /// Class/id tokens of contributor/byline/vcard ancestors.
    pub author_context_tokens: Vec<String>,
    /// Class/id tokens of facepile/likes/avatar ancestors.
    pub facepile_tokens: Vec<String>,
    /// Substrings marking placeholder image URLs.
    pub placeholder_tokens: Vec<String>,
    /// Patterns marking tracking-pixel URLs.
    pub tracking_patterns: Vec<String>,
    /// Lazy-load attributes, in resolution priority order.
    pub lazy_src_attributes: Vec<String>,
    /// Class tokens of standfirst/deck elements.
    pub standfirst_class_tokens: Vec<String>,
    /// First words that mark a paragraph as narrative rather than a standfirst.
    pub narrative_openers: Vec<String>,
    /// Generic site-section labels rejected as titles.
    pub generic_titles: Vec<String>,
    /// Localized byline prefixes stripped from author names.
    pub author_prefixes: Vec<String>,
    /// Common surnames. A single-run author slug splits before the longest
    /// trailing run listed here.
    pub known_surnames: Vec<String>,
    /// Given names used to split a single-run author slug.
    pub given_names: Vec<String>,
    /// "About the author" heading phrasing.
    pub about_author_patterns: Vec<String>,
    /// Month names and abbreviations (lowercase) to month number.
    pub month_names: BTreeMap<String, u32>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl Default for RuleTables {
    fn default() -> Self {
        Self {
            excluded_class_tokens: strings(&[
                // navigation
                "nav", "navbar", "navigation", "menu", "main-menu", "breadcrumb", "breadcrumbs",
                "sidebar", "site-header", "site-footer", "footer", "masthead", "toolbar", "topbar",
                "pagination", "pager", "skip-link", "toc",
                // ads and sponsors
                "ad", "ads", "advert", "adverts", "advertisement", "advertising", "adsbygoogle",
                "ad-slot", "ad-container", "ad-wrapper", "sponsor", "sponsored", "sponsors",
                "promo", "promoted", "promotion", "dfp", "taboola", "outbrain",
                // comments
                "comment", "comments", "comment-list", "comments-area", "disqus", "respond",
                // related content
                "related", "related-posts", "related-articles", "related-stories",
                "recommended", "recommendations", "more-stories", "read-next", "most-popular",
                "trending", "you-may-like",
                // paywall and subscription prompts
                "paywall", "piano", "subscribe", "subscription", "newsletter", "signup",
                "sign-up", "login", "register", "regwall", "meter",
                // course/product CTAs
                "cta", "call-to-action", "upsell", "course-cta", "product-cta", "course-promo",
                "product-promo",
                // accordions and share buttons
                "accordion", "share", "sharing", "share-buttons", "sharedaddy", "social",
                "social-share", "social-links", "addtoany", "share-bar",
                // author boxes, meta rows and consent
                "author-bio", "author-box", "bio-box", "about-author", "post-meta", "entry-meta",
                "tags", "tag-list", "tag-cloud", "cookie", "consent", "gdpr", "popup", "modal",
            ]),
            ad_container_patterns: strings(&[
                r"\bad\b",
                r"\bads\b",
                r"advertisement",
                r"\badvert",
                r"\bsponsor",
                r"adsbygoogle",
                r"\bgoogle[-_]ad",
                r"\bdfp[-_]",
            ]),
            navigation_patterns: strings(&[
                // English
                r"^\W*(?:read more|continue reading|keep reading|read the full (?:article|story)|read next|see more|view more|load more)\b",
                r"^\W*(?:related(?: posts| articles| stories| content| reading| links)?|more (?:stories|articles|from)|you (?:may|might) also (?:like|enjoy)|recommended(?: for you| reading| articles)?|most popular|trending now|popular posts)\b",
                r"^\W*(?:share (?:this|on)|follow us|subscribe (?:now|today|to)|sign up (?:for|to|now)|already a (?:subscriber|member)|(?:log|sign) in to (?:read|continue|comment)|create a free account)\b",
                r"^\W*(?:to continue reading|this (?:article|content|story) is (?:for|available to|only available to|reserved for) (?:subscribers|members|premium)|become a (?:member|subscriber) to|unlock (?:this|the full) (?:article|story))",
                r"^\W*(?:previous|next) (?:post|article|story)\b",
                r"^\W*(?:back to top|skip to (?:main )?content)\b",
                r"^\W*(?:advertisement|anzeige|publicité|publicidad|pubblicità|publicidade|advertentie|реклама|reklama|广告|広告)\W*$",
                // Spanish
                r"^\W*(?:leer más|seguir leyendo|sigue leyendo|artículos relacionados|noticias relacionadas|(?:también )?te puede interesar|suscríbete|ya eres suscriptor|compartir en)",
                // French
                r"^\W*(?:lire la suite|lire aussi|à lire aussi|articles (?:similaires|connexes)|vous aimerez aussi|abonnez-vous|déjà abonné|partager sur|cet article est réservé aux abonnés)",
                // German
                r"^\W*(?:weiterlesen|mehr lesen|lesen sie auch|ähnliche artikel|verwandte artikel|das könnte sie auch interessieren|jetzt abonnieren|bereits abonnent|teilen auf|dieser artikel ist (?:nur )?für abonnenten)",
                // Italian
                r"^\W*(?:leggi (?:anche|di più|tutto)|continua a leggere|articoli correlati|potrebbe interessarti|abbonati|sei già abbonato|condividi su)",
                // Portuguese
                r"^\W*(?:leia (?:mais|também)|continue lendo|continuar a ler|artigos relacionados|notícias relacionadas|você também pode gostar|assine já|já é assinante|compartilhe)",
                // Dutch
                r"^\W*(?:lees (?:meer|verder|ook)|gerelateerde artikelen|misschien ook interessant|word abonnee|al abonnee|deel dit)",
                // Russian
                r"^\W*(?:читать (?:далее|также|ещё|еще)|читайте также|похожие (?:статьи|новости|материалы)|вам может понравиться|подпишитесь|подписывайтесь|поделиться)",
                // Polish
                r"^\W*(?:czytaj (?:więcej|także|też|dalej)|zobacz (?:też|także)|powiązane artykuły|podobne artykuły|subskrybuj|udostępnij)",
                // Japanese
                r"^\W*(?:続きを読む|もっと読む|関連記事|おすすめ記事|購読する|シェアする)",
                // Chinese
                r"^\W*(?:阅读更多|阅读全文|相关文章|相关阅读|推荐阅读|订阅|分享到)",
            ]),
            solicitation_patterns: strings(&[
                r"support (?:our|independent|quality) journalism",
                r"make a (?:donation|contribution)",
                r"\bdonate (?:now|today)\b",
                r"become a (?:patron|supporter|paying member)",
                r"(?:sign up|subscribe) (?:for|to) (?:our|the|my) (?:free )?newsletter",
                r"get the (?:latest|best)\b.{0,60}\b(?:in|to) your inbox",
                r"delivered (?:straight |directly )?to your inbox",
                r"join \d[\d,.]* (?:other )?(?:subscribers|readers)",
                r"enter your e-?mail(?: address)?",
            ]),
            course_keywords: strings(&[
                "course", "courses", "enroll", "enrol", "masterclass", "bootcamp", "training",
                "workshop", "lessons", "certification", "curso", "cours", "formation", "kurs",
                "corso", "курс",
            ]),
            metadata_line_patterns: strings(&[
                r"^\W*original article\b.{0,40}\b\d[\d,.]*\s*words?\W*$",
                r"^\W*\d[\d,.]*\s*(?:words?|palabras|mots|wörter|parole|palavras|woorden|слов\w*|słów)\W*$",
                r"^\W*\d+\s*(?:min(?:ute)?s?|мин)\.?\s*(?:read|de lectura|de lecture|lesezeit|di lettura|чтения)\W*$",
                r"^\W*(?:edited|reviewed|fact[- ]checked|illustrated|produced|reporting|additional reporting) by\b",
                r"^\W*(?:by|por|par|von|di|da|door|przez|от|автор:?)\s+(?-i:\p{Lu})[\p{L}'’.-]*(?:\s+(?-i:\p{Lu})[\p{L}'’.-]*){0,3}\W*$",
            ]),
            boilerplate_headings: strings(&[
                "tags", "tag", "related", "related articles", "related posts", "related stories",
                "related content", "more from", "from the archive", "share this", "share",
                "comments", "leave a comment", "leave a reply", "you may also like", "read next",
                "recommended", "newsletter", "etiquetas", "relacionados", "mots-clés",
                "articles connexes", "schlagwörter", "verwandte artikel", "correlati", "теги",
                "похожие статьи", "tagi", "関連記事", "相关文章", "标签",
            ]),
            boilerplate_heading_prefixes: strings(&[
                "more from ", "from the archive", "related ", "more stories", "read more",
            ]),
            resource_heading_patterns: strings(&[
                r"^\W*(?:useful|additional|more|helpful) (?:resources|links)\b",
                r"^\W*(?:further|recommended|suggested) reading\b",
                r"^\W*(?:see also|external links|learn more)\W*$",
                r"^\W*(?:weiterführende links|pour aller plus loin|lecturas recomendadas)",
            ]),
            product_heading_patterns: strings(&[r"^\W*meet\s+\S"]),
            training_heading_patterns: strings(&[
                r"\bvideo\s+(?:training|course|courses|tutorials?)\b",
                r"\bonline\s+(?:course|training|class)\b",
                r"\bmasterclass\b",
                r"\bbootcamp\b",
            ]),
            guarantee_patterns: strings(&[
                r"money[- ]back",
                r"\bguarantee",
                r"risk[- ]free",
                r"\brefund",
                r"\b(?:enroll|buy|order|get it) now\b",
                r"\bonly\s*[$€£]",
            ]),
            icon_class_tokens: strings(&[
                "icon", "icons", "fa", "fas", "far", "fab", "glyphicon", "material-icons",
                "dashicons", "svg-icon", "emoji",
            ]),
            content_class_pattern: r"(?i)(article|content|post|entry|story|text|body|main)".to_string(),
            marketing_class_tokens: strings(&[
                "newsletter", "mc4wp", "mailchimp", "mc-embedded-subscribe-form", "mc_embed_signup",
                "klaviyo-form", "hs-form", "hubspot-form", "marketo", "mktoform", "pardot",
                "convertkit", "ck-form", "sendinblue", "subscribe-form", "signup-form", "optin",
                "email-signup",
            ]),
            newsletter_patterns: strings(&[
                r"newsletter",
                r"\binbox\b",
                r"\bsubscribe\b",
                r"\bsign(?:\s|-)?up\b",
                r"e-?mail address",
                r"boletín",
                r"infolettre",
                r"abonnieren",
                r"iscriviti",
                r"рассылк",
            ]),
            accordion_class_tokens: strings(&[
                "accordion", "collapse", "collapsible", "toggle", "tabs", "related",
                "related-posts", "related-articles", "expander",
            ]),
            logo_tokens: strings(&[
                "logo", "logos", "brand", "branding", "social", "share", "sharing", "facebook",
                "twitter", "linkedin", "pinterest", "whatsapp", "instagram", "youtube", "reddit",
                "rss", "sprite", "badge", "icon", "emoji", "spinner", "loader",
            ]),
            headshot_tokens: strings(&[
                "avatar", "headshot", "head-shot", "author-photo", "author-image", "author-img",
                "author-pic", "author-avatar", "author-thumb", "byline-image", "byline-photo",
                "byline-img", "byline-thumb", "byline-thumbnail", "profile-pic", "profile-photo",
                "profile-image", "gravatar", "mugshot", "contributor-image", "contributor-photo",
                "bio-photo", "bio-image",
            ]),
            author_context_tokens: strings(&[
                "contributor", "contributors", "byline", "vcard", "author", "authors",
                "author-info", "author-bio", "bio", "writer",
            ]),
            facepile_tokens: strings(&[
                "facepile", "likes", "liked-by", "avatar", "avatars", "reactions", "supporters",
            ]),
            placeholder_tokens: strings(&[
                "placeholder", "spacer", "blank", "1x1", "pixel.gif", "transparent.gif",
                "lazy-placeholder", "lazyload", "grey.gif", "gray.gif", "empty.gif",
                "loading.gif",
            ]),
            tracking_patterns: strings(&[
                r"(?:^|[/_.?&=-])(?:pixel|beacon|tracker|tracking)(?:[/_.?&=-]|$)",
                r"doubleclick\.net",
                r"google-analytics\.com",
                r"facebook\.com/tr\b",
                r"scorecardresearch\.com",
                r"quantserve\.com",
                r"/b/ss/",
            ]),
            lazy_src_attributes: strings(&[
                "data-src", "data-lazy-src", "data-original", "data-srcset", "data-lazy-srcset",
                "data-lazy", "data-url", "data-hi-res-src", "data-full-src", "data-large-src",
                "data-orig-file", "data-echo",
            ]),
            standfirst_class_tokens: strings(&[
                "standfirst", "dek", "deck", "subtitle", "sub-title", "subheadline",
                "sub-headline", "subhead", "article-summary", "summary", "lede", "lead", "intro",
                "article-intro", "excerpt", "strapline", "description",
            ]),
            narrative_openers: strings(&[
                "the", "a", "an", "in", "when", "it", "this", "on", "at", "as", "after", "for",
                "i", "we", "there", "if", "but", "and", "last", "one", "while", "since",
                "during", "over", "from", "with", "by",
            ]),
            generic_titles: strings(&[
                "home", "homepage", "home page", "about", "about us", "contact", "contact us",
                "blog", "news", "archive", "archives", "menu", "search", "index",
            ]),
            author_prefixes: strings(&[
                "written by", "posted by", "author:", "автор:", "by", "от", "von", "par",
                "por", "da", "di", "door", "przez", "作者",
            ]),
            known_surnames: strings(&[
                "smith", "jones", "johnson", "williams", "brown", "miller", "davis", "wilson",
                "anderson", "taylor", "thomas", "moore", "martin", "jackson", "white", "harris",
                "clark", "lewis", "walker", "young", "wright", "green", "baker", "adams",
                "nelson", "carter", "turner", "parker", "evans", "collins", "stewart", "morris",
                "murphy", "cooper", "bailey", "kelly", "watson", "brooks", "bennett", "hughes",
                "connor", "garcia", "lopez", "martinez", "rodriguez", "gonzalez", "muller",
                "schmidt", "schneider", "fischer", "weber", "meyer", "wagner", "becker", "rossi",
                "russo", "dubois", "petrov", "ivanov", "mann", "berg", "stein", "ford", "wood",
            ]),
            given_names: strings(&[
                "james", "john", "robert", "michael", "mike", "william", "david", "richard",
                "joseph", "thomas", "charles", "chris", "christopher", "daniel", "matthew",
                "matt", "anthony", "mark", "paul", "steven", "steve", "andrew", "kevin",
                "brian", "george", "edward", "peter", "tom", "tim", "alex", "ben", "sam",
                "mary", "patricia", "jennifer", "jen", "linda", "elizabeth", "barbara",
                "susan", "jessica", "sarah", "karen", "nancy", "lisa", "betty", "margaret",
                "sandra", "ashley", "emily", "emma", "anna", "laura", "rachel", "kate",
                "katie", "jane", "julia", "maria", "amy", "lucy",
            ]),
            about_author_patterns: strings(&[
                r"^\W*(?:about the (?:author|writer)|über den autor|à propos de l'auteur|sobre el autor|sobre o autor|sull'autore|over de auteur|o autorze|об авторе)",
            ]),
            month_names: default_months(),
        }
    }
}

fn default_months() -> BTreeMap<String, u32> {
    let groups: [(u32, &[&str]); 12] = [
        (1, &["january", "jan", "janvier", "janv", "januar", "jän", "enero", "ene", "gennaio", "gen", "janeiro", "januari"]),
        (2, &["february", "feb", "février", "févr", "fevrier", "februar", "febrero", "febbraio", "fevereiro", "fev", "februari"]),
        (3, &["march", "mar", "mars", "märz", "marzo", "março", "maart", "mrt"]),
        (4, &["april", "apr", "avril", "avr", "abril", "abr", "aprile"]),
        (5, &["may", "mai", "mayo", "maggio", "mag", "maio", "mei"]),
        (6, &["june", "jun", "juin", "juni", "junio", "giugno", "giu", "junho"]),
        (7, &["july", "jul", "juillet", "juil", "juli", "julio", "luglio", "lug", "julho"]),
        (8, &["august", "aug", "août", "aout", "agosto", "ago", "augustus"]),
        (9, &["september", "sep", "sept", "septembre", "septiembre", "settembre", "set", "setembro"]),
        (10, &["october", "oct", "octobre", "oktober", "okt", "octubre", "ottobre", "ott", "outubro", "out"]),
        (11, &["november", "nov", "novembre", "noviembre", "novembro"]),
        (12, &["december", "dec", "décembre", "déc", "dezember", "dez", "diciembre", "dic", "dicembre", "dezembro"]),
    ];

    let mut months = BTreeMap::new();
    for (number, names) in groups {
        for name in names {
            months.insert((*name).to_string(), number);
        }
    }
    months
}

impl RuleTables {
    /// Parse a rule table from JSON. Missing fields fall back to the built-in
    /// defaults, so a host can override a single table.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Compile into matchers.
    pub fn compile(self) -> Result<CompiledRules> {
        CompiledRules::new(self)
    }
}

/// Rule tables with every pattern compiled.
#[derive(Debug, Clone)]
pub struct CompiledRules {
    tables: RuleTables,
    pub(crate) excluded_class: Regex,
    pub(crate) excluded_tokens: HashSet<String>,
    pub(crate) ad_container: Regex,
    pub(crate) navigation: Regex,
    pub(crate) solicitation: Regex,
    pub(crate) course_keyword: Regex,
    pub(crate) metadata_line: Regex,
    pub(crate) boilerplate_headings: HashSet<String>,
    pub(crate) resource_heading: Regex,
    pub(crate) product_heading: Regex,
    pub(crate) training_heading: Regex,
    pub(crate) guarantee: Regex,
    pub(crate) icon_class: Regex,
    pub(crate) content_class: Regex,
    pub(crate) marketing_class: Regex,
    pub(crate) newsletter: Regex,
    pub(crate) accordion_class: Regex,
    pub(crate) logo_token: Regex,
    pub(crate) headshot_class: Regex,
    pub(crate) author_context: Regex,
    pub(crate) facepile_context: Regex,
    pub(crate) tracking_url: Regex,
    pub(crate) standfirst_class: Regex,
    pub(crate) about_author: Regex,
}

/// Regex that can never match, used for empty tables.
const NEVER: &str = r"[^\s\S]";

/// Build a token matcher where `-`, `_` and whitespace are the boundaries.
fn token_regex(table: &'static str, tokens: &[String]) -> Result<Regex> {
    let alternatives: Vec<String> = tokens
        .iter()
        .filter(|t| !t.is_empty())
        .map(|t| regex::escape(&t.to_lowercase()))
        .collect();
    if alternatives.is_empty() {
        return Regex::new(NEVER).map_err(|source| Error::InvalidRule { table, source });
    }
    let pattern = format!(r"(?i)(?:^|[\s_-])(?:{})(?:[\s_-]|$)", alternatives.join("|"));
    Regex::new(&pattern).map_err(|source| Error::InvalidRule { table, source })
}

/// Join a list of patterns into one case-insensitive alternation.
fn any_regex(table: &'static str, patterns: &[String]) -> Result<Regex> {
    let alternatives: Vec<String> = patterns
        .iter()
        .filter(|p| !p.is_empty())
        .map(|p| format!("(?:{p})"))
        .collect();
    if alternatives.is_empty() {
        return Regex::new(NEVER).map_err(|source| Error::InvalidRule { table, source });
    }
    let pattern = format!("(?i){}", alternatives.join("|"));
    Regex::new(&pattern).map_err(|source| Error::InvalidRule { table, source })
}

/// Literal keywords joined as a whole-word alternation.
fn keyword_regex(table: &'static str, words: &[String]) -> Result<Regex> {
    let escaped: Vec<String> = words.iter().filter(|w| !w.is_empty()).map(|w| regex::escape(w)).collect();
    if escaped.is_empty() {
        return Regex::new(NEVER).map_err(|source| Error::InvalidRule { table, source });
    }
    let pattern = format!(r"(?i)\b(?:{})\b", escaped.join("|"));
    Regex::new(&pattern).map_err(|source| Error::InvalidRule { table, source })
}

impl CompiledRules {
    /// Compile every table.
    pub fn new(tables: RuleTables) -> Result<Self> {
        let excluded_tokens = tables
            .excluded_class_tokens
            .iter()
            .map(|t| t.to_lowercase())
            .collect();
        let boilerplate_headings = tables
            .boilerplate_headings
            .iter()
            .map(|h| h.to_lowercase())
            .collect();
        let content_class = Regex::new(&tables.content_class_pattern)
            .map_err(|source| Error::InvalidRule { table: "content_class_pattern", source })?;

        Ok(Self {
            excluded_class: token_regex("excluded_class_tokens", &tables.excluded_class_tokens)?,
            excluded_tokens,
            ad_container: any_regex("ad_container_patterns", &tables.ad_container_patterns)?,
            navigation: any_regex("navigation_patterns", &tables.navigation_patterns)?,
            solicitation: any_regex("solicitation_patterns", &tables.solicitation_patterns)?,
            course_keyword: keyword_regex("course_keywords", &tables.course_keywords)?,
            metadata_line: any_regex("metadata_line_patterns", &tables.metadata_line_patterns)?,
            boilerplate_headings,
            resource_heading: any_regex("resource_heading_patterns", &tables.resource_heading_patterns)?,
            product_heading: any_regex("product_heading_patterns", &tables.product_heading_patterns)?,
            training_heading: any_regex("training_heading_patterns", &tables.training_heading_patterns)?,
            guarantee: any_regex("guarantee_patterns", &tables.guarantee_patterns)?,
            icon_class: token_regex("icon_class_tokens", &tables.icon_class_tokens)?,
            content_class,
            marketing_class: token_regex("marketing_class_tokens", &tables.marketing_class_tokens)?,
            newsletter: any_regex("newsletter_patterns", &tables.newsletter_patterns)?,
            accordion_class: token_regex("accordion_class_tokens", &tables.accordion_class_tokens)?,
            logo_token: token_regex("logo_tokens", &tables.logo_tokens)?,
            headshot_class: token_regex("headshot_tokens", &tables.headshot_tokens)?,
            author_context: token_regex("author_context_tokens", &tables.author_context_tokens)?,
            facepile_context: token_regex("facepile_tokens", &tables.facepile_tokens)?,
            tracking_url: any_regex("tracking_patterns", &tables.tracking_patterns)?,
            standfirst_class: token_regex("standfirst_class_tokens", &tables.standfirst_class_tokens)?,
            about_author: any_regex("about_author_patterns", &tables.about_author_patterns)?,
            tables,
        })
    }

    /// The source tables.
    #[must_use]
    pub fn tables(&self) -> &RuleTables {
        &self.tables
    }

    /// Word-boundary-aware class/id match against the excluded-class table.
    #[must_use]
    pub fn is_excluded_class(&self, id_class: &str) -> bool {
        self.excluded_class.is_match(id_class)
    }

    /// Whole-token match, used for images where substring hits are too noisy.
    #[must_use]
    pub fn is_excluded_class_strict(&self, id_class: &str) -> bool {
        id_class
            .split_whitespace()
            .any(|token| self.excluded_tokens.contains(&token.to_lowercase()))
    }

    /// Navigation/paywall/related phrasing.
    #[must_use]
    pub fn is_navigation_text(&self, text: &str) -> bool {
        self.navigation.is_match(text)
    }

    /// Donation and newsletter solicitation phrasing.
    #[must_use]
    pub fn is_solicitation_text(&self, text: &str) -> bool {
        self.solicitation.is_match(text)
    }

    /// Word counts, reading times and short byline lines.
    #[must_use]
    pub fn is_metadata_line(&self, text: &str) -> bool {
        self.metadata_line.is_match(text)
    }

    /// Price mention combined with a course keyword.
    #[must_use]
    pub fn is_course_ad(&self, text: &str) -> bool {
        crate::patterns::PRICE.is_match(text) && self.course_keyword.is_match(text)
    }

    /// Literal boilerplate headings and prefixes.
    #[must_use]
    pub fn is_boilerplate_heading(&self, text: &str) -> bool {
        let normalized = text.trim().trim_end_matches(':').trim().to_lowercase();
        if self.boilerplate_headings.contains(&normalized) {
            return true;
        }
        self.tables
            .boilerplate_heading_prefixes
            .iter()
            .any(|prefix| normalized.starts_with(&prefix.to_lowercase()))
    }

    /// Class/id pattern suggesting article content.
    #[must_use]
    pub fn is_content_class(&self, id_class: &str) -> bool {
        self.content_class.is_match(id_class)
    }

    /// Month number for a (lowercase or mixed case) month name, trailing dot ignored.
    #[must_use]
    pub fn month_number(&self, name: &str) -> Option<u32> {
        let key = name.trim().trim_end_matches('.').to_lowercase();
        self.tables.month_names.get(&key).copied()
    }
}

/// Built-in rule tables, compiled on first use.
#[allow(clippy::expect_used)]
pub static DEFAULT_RULES: LazyLock<Arc<CompiledRules>> = LazyLock::new(|| {
    Arc::new(
        RuleTables::default()
            .compile()
            .expect("built-in rule tables compile"),
    )
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables_compile() {
        assert!(RuleTables::default().compile().is_ok());
    }

    #[test]
    fn excluded_class_respects_word_boundaries() {
        let rules = &*DEFAULT_RULES;
        assert!(rules.is_excluded_class("main-nav"));
        assert!(rules.is_excluded_class("post related-posts"));
        assert!(rules.is_excluded_class("ad"));
        assert!(!rules.is_excluded_class("lead-article-image"));
        assert!(!rules.is_excluded_class("contextmenu"));
        assert!(!rules.is_excluded_class("shareable-quote"));
    }

    #[test]
    fn strict_match_requires_whole_token() {
        let rules = &*DEFAULT_RULES;
        assert!(rules.is_excluded_class_strict("img ad"));
        assert!(!rules.is_excluded_class_strict("ad-hero-image"));
    }

    #[test]
    fn navigation_phrases_cover_several_languages() {
        let rules = &*DEFAULT_RULES;
        assert!(rules.is_navigation_text("Read more"));
        assert!(rules.is_navigation_text("Lire la suite"));
        assert!(rules.is_navigation_text("Weiterlesen »"));
        assert!(rules.is_navigation_text("Читайте также: новости"));
        assert!(rules.is_navigation_text("相关文章"));
        assert!(!rules.is_navigation_text("The river rose overnight."));
    }

    #[test]
    fn course_ad_needs_price_and_keyword() {
        let rules = &*DEFAULT_RULES;
        assert!(rules.is_course_ad("Enroll in the course today for $49"));
        assert!(!rules.is_course_ad("The course of the river changed."));
        assert!(!rules.is_course_ad("Tickets cost $49."));
    }

    #[test]
    fn boilerplate_headings_match_literals_and_prefixes() {
        let rules = &*DEFAULT_RULES;
        assert!(rules.is_boilerplate_heading("Tags:"));
        assert!(rules.is_boilerplate_heading("More from The Verge"));
        assert!(rules.is_boilerplate_heading("From the archive"));
        assert!(!rules.is_boilerplate_heading("Tagging wildlife in the Arctic"));
    }

    #[test]
    fn json_override_keeps_other_defaults() {
        let tables = RuleTables::from_json(r#"{"generic_titles": ["start"]}"#);
        assert!(tables.is_ok());
        let tables = tables.unwrap_or_default();
        assert_eq!(tables.generic_titles, vec!["start".to_string()]);
        assert!(!tables.excluded_class_tokens.is_empty());
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let tables = RuleTables {
            navigation_patterns: vec!["(unclosed".to_string()],
            ..RuleTables::default()
        };
        match tables.compile() {
            Err(Error::InvalidRule { table, .. }) => assert_eq!(table, "navigation_patterns"),
            other => panic!("expected InvalidRule, got {other:?}"),
        }
    }

    #[test]
    fn month_lookup_is_case_insensitive() {
        let rules = &*DEFAULT_RULES;
        assert_eq!(rules.month_number("Sept."), Some(9));
        assert_eq!(rules.month_number("März"), Some(3));
        assert_eq!(rules.month_number("Smarch"), None);
    }
}
