use crate::explanation::types::{BreedingReport, LabeledValue, ParentProfile, RiskItem};
use crate::utils::escape_html;

/// HTML formatter for breeding reports
pub struct HtmlFormatter;

impl HtmlFormatter {
    /// Format report as standalone HTML with embedded CSS
    ///
    /// All plant-derived text is escaped.
    pub fn format(report: &BreedingReport) -> String {
        let mut html = String::with_capacity(8192);

        // HTML header with CSS
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        html.push_str("<meta charset=\"UTF-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", escape_html(&report.title)));
        html.push_str("<style>\n");
        html.push_str("body { font-family: system-ui, sans-serif; max-width: 860px; margin: 40px auto; padding: 20px; line-height: 1.6; }\n");
        html.push_str(".score { font-size: 1.5em; font-weight: bold; color: #2c3e50; }\n");
        html.push_str("h1 { color: #2c3e50; margin-bottom: 10px; }\n");
        html.push_str("h2 { color: #34495e; border-bottom: 2px solid #ecf0f1; padding-bottom: 5px; margin-top: 30px; }\n");
        html.push_str("h3 { color: #34495e; margin-top: 20px; }\n");
        html.push_str(".parent { background: #eef6ee; border-left: 4px solid #28a745; padding: 15px; margin: 15px 0; border-radius: 4px; }\n");
        html.push_str(".risk { background: #f8d7da; border-left: 4px solid #dc3545; padding: 15px; margin: 15px 0; border-radius: 4px; }\n");
        html.push_str(".positive { color: #28a745; font-weight: 600; }\n");
        html.push_str(".negative { color: #dc3545; font-weight: 600; }\n");
        html.push_str("table { width: 100%; border-collapse: collapse; margin: 16px 0; }\n");
        html.push_str("th { background: #34495e; color: white; text-align: left; padding: 12px; font-weight: 600; }\n");
        html.push_str("td { padding: 12px; border-bottom: 1px solid #ecf0f1; }\n");
        html.push_str("tr:hover { background: #f8f9fa; }\n");
        html.push_str("</style>\n</head>\n<body>\n");

        html.push_str(&format!("<h1>{}</h1>\n", escape_html(&report.title)));

        // Executive summary
        let summary = &report.executive_summary;
        html.push_str("<h2>1. Executive Summary</h2>\n");
        html.push_str(&format!(
            "<p class=\"score\">{}% success &middot; {} compatibility</p>\n",
            summary.success_probability,
            summary.compatibility_rating.label()
        ));
        html.push_str(&format!(
            "<p>Confidence: {:.0}%</p>\n",
            summary.confidence_level * 100.0
        ));
        html.push_str(&format!("<p>{}</p>\n", escape_html(&summary.key_finding)));

        // Parents
        html.push_str("<h2>2. Parent Species Analysis</h2>\n");
        Self::format_parent(&mut html, &report.parent_analysis.plant_a);
        Self::format_parent(&mut html, &report.parent_analysis.plant_b);

        // Traits
        let traits = &report.trait_compatibility;
        html.push_str("<h2>3. Trait Compatibility Assessment</h2>\n");
        html.push_str(&format!(
            "<p><strong>Trait similarity:</strong> {:.1}%</p>\n",
            traits.similarity_percentage
        ));
        html.push_str("<h3>Complementary Traits</h3>\n");
        Self::format_list(&mut html, &traits.complementary_traits);
        html.push_str("<h3>Potential Conflicts</h3>\n");
        Self::format_list(&mut html, &traits.potential_conflicts);
        html.push_str(&format!("<p>{}</p>\n", escape_html(&traits.trait_interactions)));

        // Prediction
        let prediction = &report.hybridization_prediction;
        html.push_str("<h2>4. Hybridization Success Prediction</h2>\n");
        html.push_str("<table>\n<tr><th>Factor</th><th>Compared</th><th>Impact</th></tr>\n");
        for factor in &prediction.factors {
            let class = if factor.impact < 0 { "negative" } else { "positive" };
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td class=\"{}\">{:+}</td></tr>\n",
                escape_html(&factor.name),
                escape_html(&factor.detail),
                class,
                factor.impact
            ));
        }
        html.push_str("</table>\n");
        html.push_str(&format!(
            "<p><em>{}</em></p>\n",
            escape_html(&prediction.genetic_basis)
        ));
        html.push_str(&format!(
            "<p><strong>Hybrid vigor:</strong> {}</p>\n",
            escape_html(&prediction.expected_vigor)
        ));

        // F1
        let f1 = &report.expected_f1_characteristics;
        html.push_str("<h2>5. Expected F1 Characteristics</h2>\n");
        Self::format_list(&mut html, &f1.dominant_traits);
        html.push_str(&format!("<p>{}</p>\n", escape_html(&f1.yield_prediction)));
        Self::format_table(&mut html, &f1.quality_metrics);

        // Improvement
        let plan = &report.improvement_recommendations;
        html.push_str("<h2>6. Improvement Recommendations</h2>\n");
        html.push_str("<h3>Short Term</h3>\n");
        Self::format_list(&mut html, &plan.short_term);
        html.push_str("<h3>Long Term</h3>\n");
        Self::format_list(&mut html, &plan.long_term);
        html.push_str("<h3>Breeding Timeline</h3>\n");
        Self::format_table(&mut html, &plan.breeding_timeline);

        // Environment
        let env = &report.environmental_adaptability;
        html.push_str("<h2>7. Environmental Adaptability</h2>\n");
        html.push_str(&format!(
            "<p><strong>Optimal zones:</strong> {}</p>\n",
            escape_html(&env.optimal_zones.join(", "))
        ));
        html.push_str(&format!("<p>{}</p>\n", escape_html(&env.climate_requirements)));
        html.push_str(&format!("<p>{}</p>\n", escape_html(&env.water_management)));

        // Risks
        let risks = &report.risk_assessment;
        html.push_str("<h2>8. Risk Assessment</h2>\n");
        for item in risks
            .technical_risks
            .iter()
            .chain(&risks.environmental_risks)
            .chain(&risks.market_risks)
        {
            Self::format_risk(&mut html, item);
        }

        // Conclusion
        let conclusion = &report.conclusion;
        html.push_str("<h2>9. Conclusion</h2>\n");
        html.push_str(&format!(
            "<p><strong>{}</strong></p>\n",
            escape_html(&conclusion.overall_recommendation)
        ));
        html.push_str("<ol>\n");
        for step in &conclusion.next_steps {
            html.push_str(&format!("<li>{}</li>\n", escape_html(step)));
        }
        html.push_str("</ol>\n");
        html.push_str(&format!(
            "<p>{}<br>{}</p>\n",
            escape_html(&conclusion.expected_timeline),
            escape_html(&conclusion.investment_priority)
        ));

        html.push_str("</body>\n</html>\n");
        html
    }

    fn format_parent(html: &mut String, parent: &ParentProfile) {
        html.push_str("<div class=\"parent\">\n");
        html.push_str(&format!(
            "<h3>{} (<em>{}</em>)</h3>\n",
            escape_html(&parent.name),
            escape_html(&parent.scientific_name)
        ));
        html.push_str(&format!("<p>Zone: {}</p>\n", parent.zone));
        Self::format_list(html, &parent.strengths);
        Self::format_list(html, &parent.limitations);
        html.push_str("</div>\n");
    }

    fn format_list(html: &mut String, items: &[String]) {
        html.push_str("<ul>\n");
        for item in items {
            html.push_str(&format!("<li>{}</li>\n", escape_html(item)));
        }
        html.push_str("</ul>\n");
    }

    fn format_table(html: &mut String, rows: &[LabeledValue]) {
        html.push_str("<table>\n");
        for row in rows {
            html.push_str(&format!(
                "<tr><td><strong>{}</strong></td><td>{}</td></tr>\n",
                escape_html(&row.label),
                escape_html(&row.value)
            ));
        }
        html.push_str("</table>\n");
    }

    fn format_risk(html: &mut String, item: &RiskItem) {
        html.push_str("<div class=\"risk\">\n");
        html.push_str(&format!("<p><strong>{}</strong></p>\n", escape_html(&item.risk)));
        html.push_str(&format!("<p><em>Mitigation: {}</em></p>\n", escape_html(&item.mitigation)));
        html.push_str("</div>\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::BreedingData;
    use crate::explanation::ReportGenerator;
    use crate::scorer::CompatibilityScorer;

    #[test]
    fn test_format_html_escapes_names() {
        let data = BreedingData::builtin().unwrap();
        let mut a = data.plant(1).unwrap().clone();
        a.common_name = "Wheat <b>&</b>".to_string();
        let b = data.plant(2).unwrap();
        let score = CompatibilityScorer::new().score(&a.profile(), &b.profile());
        let html = HtmlFormatter::format(&ReportGenerator::generate(&a, b, &score));

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Wheat &lt;b&gt;&amp;&lt;/b&gt;"));
        assert!(!html.contains("<b>&</b>"));
        assert!(html.contains("<td class=\"negative\">-15</td>"));
        assert!(html.ends_with("</html>\n"));
    }
}
