/// Use cases module containing application business logic orchestration
mod crawl_identities;

pub use crawl_identities::CrawlIdentitiesUseCase;
