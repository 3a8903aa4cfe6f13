//! Startup application form state

use std::fmt;

use serde::{Deserialize, Serialize};

use super::file::FileUpload;

/// Funding stage options for the startup form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum StartupStage {
    /// Pre-incorporation or concept stage
    Idea,
    /// Incorporated, raising the first outside capital
    PreSeed,
    /// Raising a seed round
    Seed,
    /// Raising a Series A
    SeriesA,
    /// Series B or later
    SeriesBPlus,
}

impl StartupStage {
    pub const ALL: [StartupStage; 5] = [
        StartupStage::Idea,
        StartupStage::PreSeed,
        StartupStage::Seed,
        StartupStage::SeriesA,
        StartupStage::SeriesBPlus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StartupStage::Idea => "idea",
            StartupStage::PreSeed => "pre-seed",
            StartupStage::Seed => "seed",
            StartupStage::SeriesA => "series-a",
            StartupStage::SeriesBPlus => "series-b-plus",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == value)
    }
}

impl fmt::Display for StartupStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Industry options for the startup form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Industry {
    Fintech,
    Healthcare,
    EnterpriseSaas,
    ConsumerTech,
    AiMl,
    Climate,
    Logistics,
    Other,
}

impl Industry {
    pub const ALL: [Industry; 8] = [
        Industry::Fintech,
        Industry::Healthcare,
        Industry::EnterpriseSaas,
        Industry::ConsumerTech,
        Industry::AiMl,
        Industry::Climate,
        Industry::Logistics,
        Industry::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Industry::Fintech => "fintech",
            Industry::Healthcare => "healthcare",
            Industry::EnterpriseSaas => "enterprise-saas",
            Industry::ConsumerTech => "consumer-tech",
            Industry::AiMl => "ai-ml",
            Industry::Climate => "climate",
            Industry::Logistics => "logistics",
            Industry::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == value)
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Traction options for the startup form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TractionLevel {
    PreLaunch,
    EarlyUsers,
    Revenue,
    Scaling,
}

impl TractionLevel {
    pub const ALL: [TractionLevel; 4] = [
        TractionLevel::PreLaunch,
        TractionLevel::EarlyUsers,
        TractionLevel::Revenue,
        TractionLevel::Scaling,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TractionLevel::PreLaunch => "pre-launch",
            TractionLevel::EarlyUsers => "early-users",
            TractionLevel::Revenue => "revenue",
            TractionLevel::Scaling => "scaling",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == value)
    }
}

impl fmt::Display for TractionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raise amount bands for the startup form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RaiseAmount {
    #[serde(rename = "under-500k")]
    Under500k,
    #[serde(rename = "500k-1m")]
    HalfTo1m,
    #[serde(rename = "1m-3m")]
    OneTo3m,
    #[serde(rename = "3m-plus")]
    ThreePlus,
}

impl RaiseAmount {
    pub const ALL: [RaiseAmount; 4] = [
        RaiseAmount::Under500k,
        RaiseAmount::HalfTo1m,
        RaiseAmount::OneTo3m,
        RaiseAmount::ThreePlus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RaiseAmount::Under500k => "under-500k",
            RaiseAmount::HalfTo1m => "500k-1m",
            RaiseAmount::OneTo3m => "1m-3m",
            RaiseAmount::ThreePlus => "3m-plus",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == value)
    }
}

impl fmt::Display for RaiseAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Revenue bands for the optional revenue field
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RevenueBand {
    #[serde(rename = "pre-revenue")]
    PreRevenue,
    #[serde(rename = "under-100k")]
    Under100k,
    #[serde(rename = "100k-1m")]
    HundredKTo1m,
    #[serde(rename = "1m-plus")]
    OneMPlus,
}

impl RevenueBand {
    pub const ALL: [RevenueBand; 4] = [
        RevenueBand::PreRevenue,
        RevenueBand::Under100k,
        RevenueBand::HundredKTo1m,
        RevenueBand::OneMPlus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RevenueBand::PreRevenue => "pre-revenue",
            RevenueBand::Under100k => "under-100k",
            RevenueBand::HundredKTo1m => "100k-1m",
            RevenueBand::OneMPlus => "1m-plus",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == value)
    }
}

impl fmt::Display for RevenueBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw state of the startup application form
///
/// Built empty, mutated field by field as the founder types, submitted once.
/// Exactly one of `deck_file` / `deck_link` must be provided.
#[derive(Debug, Clone, Default)]
pub struct StartupApplication {
    /// Founder's full name
    pub full_name: String,

    /// Founder's role at the company
    pub role: String,

    /// Contact email
    pub email: String,

    /// Contact phone number
    pub phone: String,

    /// LinkedIn profile URL (optional)
    pub linkedin_url: String,

    /// Legal or trading company name
    pub company_name: String,

    /// Company website URL
    pub website: String,

    /// Funding stage, one of `StartupStage`
    pub stage: String,

    /// Industry, one of `Industry`
    pub industry: String,

    /// One-line description, at most 150 characters
    pub one_liner: String,

    /// Problem statement, at most 300 characters
    pub problem: String,

    /// Solution description, at most 300 characters
    pub solution: String,

    /// Traction, one of `TractionLevel`
    pub traction: String,

    /// Revenue band, one of `RevenueBand` (optional)
    pub revenue: String,

    /// Uploaded pitch deck, mutually exclusive with `deck_link`
    pub deck_file: Option<FileUpload>,

    /// External pitch deck URL, mutually exclusive with `deck_file`
    pub deck_link: String,

    /// Optional demo or intro video URL
    pub video_link: String,

    /// Raise amount band, one of `RaiseAmount`
    pub raise_amount: String,

    /// Amount previously raised (optional free text)
    pub previously_raised: String,

    /// Confirms the submitted information is accurate
    pub accuracy_confirm: bool,

    /// Confirms understanding that submission is not an offer to invest
    pub understanding_confirm: bool,

    /// Typed signature
    pub signature: String,
}
