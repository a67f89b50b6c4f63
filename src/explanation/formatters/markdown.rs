use crate::explanation::types::{BreedingReport, LabeledValue, ParentProfile, RiskItem};

/// Markdown formatter for breeding reports
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Format report as markdown, one numbered section per report part
    pub fn format(report: &BreedingReport) -> String {
        let mut md = String::with_capacity(4096);

        md.push_str(&format!("# {}\n\n", report.title));

        // 1. Executive summary
        let summary = &report.executive_summary;
        md.push_str("## 1. Executive Summary\n\n");
        md.push_str(&format!(
            "**Parents:** {} ({}) × {} ({})\n\n",
            summary.parent_species[0],
            summary.scientific_names[0],
            summary.parent_species[1],
            summary.scientific_names[1]
        ));
        md.push_str(&format!(
            "**Success Probability:** {}%  \n**Confidence:** {:.0}%  \n**Compatibility:** {}\n\n",
            summary.success_probability,
            summary.confidence_level * 100.0,
            summary.compatibility_rating.label()
        ));
        md.push_str(&format!("{}\n\n", summary.key_finding));

        // 2. Parents
        md.push_str("## 2. Parent Species Analysis\n\n");
        Self::format_parent(&mut md, "Parent A", &report.parent_analysis.plant_a);
        Self::format_parent(&mut md, "Parent B", &report.parent_analysis.plant_b);

        // 3. Traits
        let traits = &report.trait_compatibility;
        md.push_str("## 3. Trait Compatibility Assessment\n\n");
        md.push_str(&format!(
            "**Trait Similarity:** {:.1}%\n\n",
            traits.similarity_percentage
        ));
        if traits.shared_traits.is_empty() {
            md.push_str("**Shared Traits:** none\n\n");
        } else {
            md.push_str(&format!(
                "**Shared Traits:** {}\n\n",
                traits.shared_traits.join(", ")
            ));
        }
        md.push_str("**Complementary Traits:**\n\n");
        Self::format_list(&mut md, &traits.complementary_traits);
        md.push_str("**Potential Conflicts:**\n\n");
        Self::format_list(&mut md, &traits.potential_conflicts);
        md.push_str(&format!("{}\n\n", traits.trait_interactions));

        // 4. Prediction with factor table
        let prediction = &report.hybridization_prediction;
        md.push_str("## 4. Hybridization Success Prediction\n\n");
        md.push_str(&format!(
            "**Success Rate:** {}% (confidence {:.0}%)\n\n",
            prediction.success_rate,
            prediction.confidence * 100.0
        ));
        md.push_str("| Factor | Compared | Impact |\n");
        md.push_str("|--------|----------|--------|\n");
        for factor in &prediction.factors {
            md.push_str(&format!(
                "| {} | {} | {:+} |\n",
                factor.name, factor.detail, factor.impact
            ));
        }
        md.push('\n');
        if !prediction.reasons.is_empty() {
            md.push_str("**Favourable factors:**\n\n");
            Self::format_list(&mut md, &prediction.reasons);
        }
        md.push_str(&format!("*Genetic basis:* {}\n\n", prediction.genetic_basis));
        md.push_str(&format!("*Expected hybrid vigor:* {}  \n", prediction.expected_vigor));
        md.push_str(&format!("*Segregation:* {}\n\n", prediction.segregation_pattern));

        // 5. F1
        let f1 = &report.expected_f1_characteristics;
        md.push_str("## 5. Expected F1 Characteristics\n\n");
        Self::format_list(&mut md, &f1.dominant_traits);
        md.push_str(&format!("**Yield:** {}\n\n", f1.yield_prediction));
        Self::format_table(&mut md, "Quality metric", &f1.quality_metrics);
        md.push_str(&format!(
            "**Stress tolerance:** drought {}, heat {}, cold {}, disease {}\n\n",
            f1.stress_tolerance.drought,
            f1.stress_tolerance.heat,
            f1.stress_tolerance.cold,
            f1.stress_tolerance.disease
        ));

        // 6. Improvement
        let plan = &report.improvement_recommendations;
        md.push_str("## 6. Improvement Recommendations\n\n");
        md.push_str("### Short Term\n\n");
        Self::format_list(&mut md, &plan.short_term);
        md.push_str("### Long Term\n\n");
        Self::format_list(&mut md, &plan.long_term);
        md.push_str("### Selection Criteria\n\n");
        Self::format_table(&mut md, "Criterion", &plan.selection_criteria);
        md.push_str("### Breeding Timeline\n\n");
        Self::format_table(&mut md, "Stage", &plan.breeding_timeline);

        // 7. Environment
        let env = &report.environmental_adaptability;
        md.push_str("## 7. Environmental Adaptability\n\n");
        md.push_str(&format!("**Optimal zones:** {}  \n", env.optimal_zones.join(", ")));
        md.push_str(&format!("**Climate:** {}  \n", env.climate_requirements));
        md.push_str(&format!("**Soil:** {}  \n", env.soil_preferences));
        md.push_str(&format!("**Water:** {}\n\n", env.water_management));

        // 8. Risks
        let risks = &report.risk_assessment;
        md.push_str("## 8. Risk Assessment\n\n");
        Self::format_risks(&mut md, "Technical", &risks.technical_risks);
        Self::format_risks(&mut md, "Environmental", &risks.environmental_risks);
        Self::format_risks(&mut md, "Market", &risks.market_risks);
        md.push_str("**Mitigation strategies:**\n\n");
        Self::format_list(&mut md, &risks.mitigation_strategies);

        // 9. Conclusion
        let conclusion = &report.conclusion;
        md.push_str("## 9. Conclusion\n\n");
        md.push_str(&format!(
            "**{}** ({} compatibility)\n\n",
            conclusion.overall_recommendation, conclusion.confidence_level
        ));
        md.push_str("**Next steps:**\n\n");
        for (i, step) in conclusion.next_steps.iter().enumerate() {
            md.push_str(&format!("{}. {}\n", i + 1, step));
        }
        md.push('\n');
        md.push_str(&format!("**Timeline:** {}  \n", conclusion.expected_timeline));
        md.push_str(&format!("**Investment priority:** {}\n", conclusion.investment_priority));

        md
    }

    fn format_parent(md: &mut String, heading: &str, parent: &ParentProfile) {
        md.push_str(&format!(
            "### {}: {} (*{}*)\n\n",
            heading, parent.name, parent.scientific_name
        ));
        md.push_str(&format!("**Zone:** {}  \n", parent.zone));
        md.push_str(&format!("**Traits:** {}\n\n", parent.traits.join(", ")));
        md.push_str("Strengths:\n\n");
        Self::format_list(md, &parent.strengths);
        md.push_str("Limitations:\n\n");
        Self::format_list(md, &parent.limitations);
    }

    fn format_list(md: &mut String, items: &[String]) {
        for item in items {
            md.push_str(&format!("- {}\n", item));
        }
        md.push('\n');
    }

    fn format_table(md: &mut String, key_header: &str, rows: &[LabeledValue]) {
        md.push_str(&format!("| {} | Detail |\n", key_header));
        md.push_str("|---|---|\n");
        for row in rows {
            md.push_str(&format!("| {} | {} |\n", row.label, row.value));
        }
        md.push('\n');
    }

    fn format_risks(md: &mut String, kind: &str, risks: &[RiskItem]) {
        if risks.is_empty() {
            return;
        }
        md.push_str(&format!("**{} risks:**\n\n", kind));
        for item in risks {
            md.push_str(&format!("- {} → *{}*\n", item.risk, item.mitigation));
        }
        md.push('\n');
    }
}
