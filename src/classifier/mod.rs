//! Classification of normalized resume text

pub mod adapter;
pub mod model;
pub mod vectorizer;
pub mod verdict;

pub use adapter::{Analysis, ArtifactInfo, ClassifierAdapter};
pub use model::{LogisticRegression, ModelKind, MultinomialNb, ProbabilityModel};
pub use vectorizer::{FeatureMatrix, TfidfVectorizer, Vectorizer};
pub use verdict::Verdict;
