use scraper::{Html, Selector};

/// One `<li>` from a listing page. Either field may be missing; cards
/// without a job id never reach the detail phase.
#[derive(Debug, Clone)]
pub struct ListingCard {
    pub job_id: Option<String>,
    pub posted_time: Option<String>,
}

/// Fields pulled from a job detail page.
#[derive(Debug)]
pub struct DetailFields {
    pub job_title: Option<String>,
    pub company_name: Option<String>,
}

/// Every assumption about the job board's HTML structure lives here.
/// If the site changes its markup, this is the only module to touch.
pub struct Extractor {
    card_selector: Selector,
    posted_time_selector: Selector,
    entity_selector: Selector,
    title_selector: Selector,
    company_selector: Selector,
}

impl Extractor {
    pub fn new() -> Self {
        Extractor {
            card_selector: Selector::parse("li").unwrap(),
            posted_time_selector: Selector::parse("time.job-search-card__listdate").unwrap(),
            entity_selector: Selector::parse("div.base-card").unwrap(),
            title_selector: Selector::parse("h2").unwrap(),
            company_selector: Selector::parse("a.topcard__org-name-link").unwrap(),
        }
    }

    /// Collects one card per list item. The id is the final `:`-separated
    /// segment of the entity urn attribute.
    pub fn extract_listing_cards(&self, html: &str) -> Vec<ListingCard> {
        let document = Html::parse_document(html);
        document
            .select(&self.card_selector)
            .map(|card| {
                let posted_time = card
                    .select(&self.posted_time_selector)
                    .next()
                    .and_then(|tag| tag.value().attr("datetime"))
                    .map(str::to_string);

                let job_id = card
                    .select(&self.entity_selector)
                    .next()
                    .and_then(|base| base.value().attr("data-entity-urn"))
                    .and_then(|urn| urn.rsplit(':').next())
                    .map(str::to_string);

                ListingCard {
                    job_id,
                    posted_time,
                }
            })
            .collect()
    }

    pub fn extract_detail_fields(&self, html: &str) -> DetailFields {
        let document = Html::parse_document(html);

        let job_title = document
            .select(&self.title_selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string());

        let company_name = document
            .select(&self.company_selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string());

        DetailFields {
            job_title,
            company_name,
        }
    }
}
