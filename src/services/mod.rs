// tilmarks services
// Services are the stateless engine: classification, codec, reconciliation,
// filtering, interchange, settings, and the auto-fill summarizer.

pub mod filter_index;
pub mod interchange;
pub mod persistence_codec;
pub mod reconciler;
pub mod settings_engine;
pub mod summarizer;
pub mod url_classifier;
