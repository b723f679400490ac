//! @ai:module:intent Catalogue of example multi-agent projects across industries
//! @ai:module:layer application
//! @ai:module:public_api ProjectShowcase, Project, AgentRole, SHOWCASE_PROJECTS
//! @ai:module:stateless true
//!
//! Benefits and metrics are illustrative figures, not measurements. The saved
//! file carries `"data_source": "illustrative"`.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as FmtWrite;
use std::path::{Path, PathBuf};
use tracing::info;

/// @ai:intent One agent in a showcase project
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AgentRole {
    pub key: &'static str,
    pub purpose: &'static str,
    pub tools: &'static [&'static str],
    pub memory: &'static str,
    pub features: &'static [&'static str],
}

/// @ai:intent Named headline figure for a project
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Metric {
    pub name: &'static str,
    pub value: &'static str,
}

/// @ai:intent A complete showcase project
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Project {
    #[serde(skip)]
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub industry: &'static str,
    pub complexity: &'static str,
    #[serde(skip_serializing_if = "is_empty")]
    pub compliance: &'static [&'static str],
    pub agents: &'static [AgentRole],
    pub benefits: &'static [&'static str],
    pub metrics: &'static [Metric],
}

fn is_empty(items: &&[&str]) -> bool {
    items.is_empty()
}

const fn metric(name: &'static str, value: &'static str) -> Metric {
    Metric { name, value }
}

pub const SHOWCASE_PROJECTS: [Project; 6] = [
    Project {
        key: "e_commerce",
        name: "SmartCommerce Platform",
        description: "E-commerce platform with AI-powered customer service, product recommendations, and inventory management",
        industry: "E-commerce/Retail",
        complexity: "High",
        compliance: &[],
        agents: &[
            AgentRole {
                key: "customer_service",
                purpose: "Handle customer inquiries, order tracking, returns",
                tools: &["order_lookup", "inventory_check", "payment_processor", "shipping_tracker"],
                memory: "persistent_customer_history",
                features: &["24/7 availability", "multilingual support", "escalation to humans"],
            },
            AgentRole {
                key: "product_recommender",
                purpose: "Analyze user behavior and recommend products",
                tools: &["user_analytics", "product_database", "purchase_history", "trend_analysis"],
                memory: "user_preferences",
                features: &["personalization", "cross-selling", "upselling"],
            },
            AgentRole {
                key: "inventory_manager",
                purpose: "Monitor stock levels and predict demand",
                tools: &["inventory_api", "sales_analytics", "supplier_integration", "demand_forecasting"],
                memory: "historical_data",
                features: &["automatic reordering", "price optimization", "seasonal adjustments"],
            },
        ],
        benefits: &[
            "Reduced customer service costs by 60%",
            "24/7 customer support availability",
            "Improved customer satisfaction scores",
            "Increased sales through smart recommendations",
            "Automated inventory management",
            "Multilingual customer support",
        ],
        metrics: &[
            metric("response_time", "< 2 seconds average"),
            metric("accuracy", "94% customer query resolution"),
            metric("cost_savings", "$50K/month in support costs"),
            metric("revenue_increase", "15% from recommendations"),
        ],
    },
    Project {
        key: "healthcare",
        name: "MedAssist Healthcare Platform",
        description: "AI-powered healthcare assistant for patient support, appointment scheduling, and medical information",
        industry: "Healthcare",
        complexity: "High",
        compliance: &["HIPAA", "GDPR", "Medical Device Regulations"],
        agents: &[
            AgentRole {
                key: "patient_navigator",
                purpose: "Guide patients through healthcare processes",
                tools: &["appointment_system", "insurance_checker", "provider_directory", "symptom_checker"],
                memory: "encrypted_patient_history",
                features: &["HIPAA compliant", "appointment scheduling", "insurance verification"],
            },
            AgentRole {
                key: "medication_advisor",
                purpose: "Provide medication information and reminders",
                tools: &["drug_database", "interaction_checker", "prescription_tracker", "pharmacy_locator"],
                memory: "medication_history",
                features: &["drug interaction warnings", "dosage reminders", "side effect monitoring"],
            },
            AgentRole {
                key: "wellness_coach",
                purpose: "Provide personalized health and wellness guidance",
                tools: &["fitness_tracker", "nutrition_database", "health_metrics", "goal_tracker"],
                memory: "wellness_profile",
                features: &["personalized plans", "progress tracking", "motivational support"],
            },
        ],
        benefits: &[
            "Improved patient engagement and satisfaction",
            "Reduced administrative burden on staff",
            "24/7 patient support availability",
            "Better medication adherence",
            "Streamlined appointment scheduling",
            "Enhanced care coordination",
        ],
        metrics: &[
            metric("patient_satisfaction", "92% satisfaction rate"),
            metric("appointment_scheduling", "40% faster booking process"),
            metric("medication_adherence", "25% improvement"),
            metric("staff_time_saved", "30% reduction in admin tasks"),
        ],
    },
    Project {
        key: "fintech",
        name: "WealthGuard Financial Platform",
        description: "AI-powered financial advisor and banking assistant with fraud detection and investment guidance",
        industry: "Financial Services",
        complexity: "Very High",
        compliance: &["SOX", "PCI DSS", "GDPR", "Financial Regulations"],
        agents: &[
            AgentRole {
                key: "financial_advisor",
                purpose: "Provide personalized investment advice and portfolio management",
                tools: &["market_data", "portfolio_analyzer", "risk_calculator", "tax_optimizer"],
                memory: "financial_profile",
                features: &["risk assessment", "goal-based planning", "tax optimization"],
            },
            AgentRole {
                key: "fraud_detector",
                purpose: "Monitor transactions for suspicious activity",
                tools: &["transaction_analyzer", "pattern_recognition", "ml_models", "alert_system"],
                memory: "transaction_history",
                features: &["real-time monitoring", "risk scoring", "automated blocking"],
            },
            AgentRole {
                key: "customer_banker",
                purpose: "Handle banking inquiries and account management",
                tools: &["account_api", "transaction_lookup", "loan_calculator", "credit_analyzer"],
                memory: "customer_relationship",
                features: &["account management", "loan applications", "financial education"],
            },
        ],
        benefits: &[
            "Democratized access to financial advice",
            "Reduced fraud losses through AI detection",
            "Improved customer financial literacy",
            "24/7 banking support availability",
            "Personalized investment strategies",
            "Enhanced compliance monitoring",
        ],
        metrics: &[
            metric("fraud_detection", "99.7% accuracy rate"),
            metric("customer_satisfaction", "89% satisfaction with AI advisor"),
            metric("cost_reduction", "45% reduction in operational costs"),
            metric("portfolio_performance", "12% average annual returns"),
        ],
    },
    Project {
        key: "education",
        name: "LearnSmart Educational Platform",
        description: "AI-powered learning platform with personalized tutoring, assessment, and progress tracking",
        industry: "Education Technology",
        complexity: "Medium-High",
        compliance: &[],
        agents: &[
            AgentRole {
                key: "personal_tutor",
                purpose: "Provide personalized tutoring across subjects",
                tools: &["curriculum_database", "learning_analytics", "progress_tracker", "assessment_engine"],
                memory: "learning_profile",
                features: &["adaptive learning", "multiple learning styles", "progress tracking"],
            },
            AgentRole {
                key: "assignment_helper",
                purpose: "Assist with homework and projects",
                tools: &["subject_databases", "citation_generator", "plagiarism_checker", "research_assistant"],
                memory: "academic_history",
                features: &["step-by-step guidance", "academic integrity", "research skills"],
            },
            AgentRole {
                key: "career_counselor",
                purpose: "Provide career guidance and planning",
                tools: &["career_database", "skills_analyzer", "job_market_data", "pathway_planner"],
                memory: "career_interests",
                features: &["career exploration", "skill gap analysis", "educational planning"],
            },
        ],
        benefits: &[
            "Personalized learning experiences",
            "24/7 tutoring availability",
            "Improved student engagement",
            "Data-driven learning insights",
            "Reduced educational costs",
            "Enhanced teacher productivity",
        ],
        metrics: &[
            metric("learning_improvement", "35% faster skill acquisition"),
            metric("student_engagement", "80% increase in time spent learning"),
            metric("teacher_efficiency", "50% reduction in grading time"),
            metric("cost_per_student", "60% lower than traditional tutoring"),
        ],
    },
    Project {
        key: "content_cms",
        name: "ContentFlow CMS Platform",
        description: "AI-enhanced content management system with automated creation, optimization, and publishing",
        industry: "Media & Publishing",
        complexity: "Medium",
        compliance: &[],
        agents: &[
            AgentRole {
                key: "content_creator",
                purpose: "Generate and optimize content across platforms",
                tools: &["content_templates", "seo_optimizer", "tone_analyzer", "image_generator"],
                memory: "brand_guidelines",
                features: &["multi-format creation", "SEO optimization", "brand consistency"],
            },
            AgentRole {
                key: "social_media_manager",
                purpose: "Manage social media presence and engagement",
                tools: &["social_apis", "engagement_tracker", "hashtag_generator", "analytics_dashboard"],
                memory: "audience_insights",
                features: &["automated posting", "engagement optimization", "trend analysis"],
            },
            AgentRole {
                key: "seo_specialist",
                purpose: "Optimize content for search engines",
                tools: &["keyword_research", "serp_analyzer", "backlink_tracker", "performance_monitor"],
                memory: "seo_strategy",
                features: &["keyword optimization", "competitive analysis", "performance tracking"],
            },
        ],
        benefits: &[
            "Automated content creation at scale",
            "Consistent brand voice across channels",
            "Improved SEO performance",
            "Reduced content creation costs",
            "Data-driven content strategy",
            "Enhanced social media engagement",
        ],
        metrics: &[
            metric("content_production", "300% increase in output"),
            metric("seo_improvement", "45% increase in organic traffic"),
            metric("engagement_rate", "60% improvement in social engagement"),
            metric("cost_per_content", "70% reduction in creation costs"),
        ],
    },
    Project {
        key: "enterprise",
        name: "WorkflowAI Enterprise Suite",
        description: "AI-powered enterprise automation platform for HR, finance, and operations",
        industry: "Enterprise Software",
        complexity: "Very High",
        compliance: &[],
        agents: &[
            AgentRole {
                key: "hr_assistant",
                purpose: "Automate HR processes and employee support",
                tools: &["employee_database", "policy_engine", "payroll_system", "performance_tracker"],
                memory: "employee_profiles",
                features: &["automated onboarding", "policy guidance", "performance reviews"],
            },
            AgentRole {
                key: "finance_controller",
                purpose: "Manage financial processes and reporting",
                tools: &["accounting_system", "budget_analyzer", "expense_tracker", "compliance_checker"],
                memory: "financial_data",
                features: &["automated reconciliation", "budget monitoring", "compliance reporting"],
            },
            AgentRole {
                key: "operations_manager",
                purpose: "Optimize business operations and supply chain",
                tools: &["inventory_system", "supplier_network", "demand_forecasting", "logistics_optimizer"],
                memory: "operational_data",
                features: &["supply chain optimization", "predictive maintenance", "resource allocation"],
            },
        ],
        benefits: &[
            "Automated routine HR tasks",
            "Improved employee satisfaction",
            "Reduced operational costs",
            "Enhanced compliance monitoring",
            "Streamlined financial processes",
            "Data-driven decision making",
        ],
        metrics: &[
            metric("process_automation", "80% of routine tasks automated"),
            metric("employee_satisfaction", "25% improvement in HR service satisfaction"),
            metric("cost_savings", "$2M annual savings in operational costs"),
            metric("compliance_accuracy", "99.5% compliance rate"),
        ],
    },
];

const VERSATILITY: [&str; 6] = [
    "Multiple industry applications",
    "Various complexity levels supported",
    "Enterprise-grade capabilities",
    "Compliance and security features",
    "Cost reduction and efficiency gains",
    "Scalable architecture patterns",
];

/// @ai:intent Saved form of the showcase catalogue
#[derive(Debug, Serialize)]
pub struct ShowcaseReport {
    pub data_source: &'static str,
    pub projects: BTreeMap<&'static str, Project>,
}

/// @ai:intent Summaries and export over SHOWCASE_PROJECTS
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectShowcase;

impl ProjectShowcase {
    pub fn new() -> Self {
        Self
    }

    pub fn projects(&self) -> &'static [Project] {
        &SHOWCASE_PROJECTS
    }

    /// @ai:intent Number of agent roles across every project
    /// @ai:effects pure
    pub fn total_agents(&self) -> usize {
        self.projects().iter().map(|p| p.agents.len()).sum()
    }

    /// @ai:intent Project count per complexity level, sorted by level name
    /// @ai:effects pure
    pub fn complexity_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for project in self.projects() {
            *counts.entry(project.complexity).or_insert(0) += 1;
        }
        counts
    }

    pub fn report(&self) -> ShowcaseReport {
        ShowcaseReport {
            data_source: "illustrative",
            projects: self.projects().iter().map(|p| (p.key, *p)).collect(),
        }
    }

    /// @ai:intent Console summary: projects, industries, agent count, complexity levels
    /// @ai:effects pure
    pub fn render_console(&self) -> Result<String> {
        let mut out = String::new();
        let rule = "=".repeat(60);
        writeln!(out, "{}", rule)?;
        writeln!(out, "NIFLHEIM-X PROJECT SHOWCASE (illustrative data)")?;
        writeln!(out, "{}", rule)?;

        writeln!(out, "\nGenerated {} Project Showcases:", self.projects().len())?;
        for project in self.projects() {
            writeln!(out, "  - {} ({})", project.name, project.industry)?;
        }

        writeln!(out, "\nIndustries Covered:")?;
        let industries: std::collections::BTreeSet<&str> = self.projects().iter().map(|p| p.industry).collect();
        for industry in industries {
            writeln!(out, "  - {}", industry)?;
        }

        writeln!(out, "\nTotal Agent Types: {}", self.total_agents())?;

        writeln!(out, "\nComplexity Levels:")?;
        for (level, count) in self.complexity_counts() {
            writeln!(out, "  - {}: {} projects", level, count)?;
        }

        writeln!(out, "\nFramework Versatility Demonstrated:")?;
        for item in VERSATILITY {
            writeln!(out, "  + {}", item)?;
        }
        Ok(out)
    }

    /// @ai:intent Write project_showcases.json into output_dir
    /// @ai:effects fs:write
    pub fn save(&self, output_dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create {}", output_dir.display()))?;
        let path = output_dir.join("project_showcases.json");
        let json = serde_json::to_string_pretty(&self.report())?;
        std::fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "Project showcases saved");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_catalogue_totals() {
        let showcase = ProjectShowcase::new();
        assert_eq!(showcase.projects().len(), 6);
        assert_eq!(showcase.total_agents(), 18);

        let counts: Vec<(&str, usize)> = showcase.complexity_counts().into_iter().collect();
        assert_eq!(
            counts,
            vec![("High", 2), ("Medium", 1), ("Medium-High", 1), ("Very High", 2)]
        );
    }

    #[test]
    fn test_console_summary() {
        let text = ProjectShowcase::new().render_console().unwrap();
        assert!(text.contains("  - WealthGuard Financial Platform (Financial Services)"));
        assert!(text.contains("Total Agent Types: 18"));
        assert!(text.contains("  - Very High: 2 projects"));
        assert!(text.trim_end().ends_with("+ Scalable architecture patterns"));
    }

    #[test]
    fn test_saved_catalogue_is_labelled() {
        let temp = TempDir::new().unwrap();
        let path = ProjectShowcase::new().save(temp.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();

        assert_eq!(json["data_source"], "illustrative");
        assert_eq!(json["projects"].as_object().unwrap().len(), 6);
        assert_eq!(json["projects"]["healthcare"]["compliance"][0], "HIPAA");
        assert!(json["projects"]["education"].get("compliance").is_none());
        assert_eq!(json["projects"]["enterprise"]["agents"][1]["key"], "finance_controller");
    }
}
