use crate::application::read_models::{
    ApisView, BaseImagesView, ChatRole, DashboardView, DependenciesView, GranularDetail,
    HighLevelDetail, ImagesView, InfrastructureView, OpensourceSecurityView,
    RepositoryActivityView, SecurityFindingsView, ServiceListView, ServiceOwnerView,
    TechnologiesView, ViewContent,
};
use crate::application::read_models::service_owner_view::format_number;
use crate::dashboard::domain::{DashboardMetrics, Severity, SeverityCounts};
use crate::ports::outbound::ViewFormatter;
use crate::shared::Result;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Markdown table header for the overview counters
const METRICS_TABLE_HEADER: &str = "| Metric | Value |\n";
const METRICS_TABLE_SEPARATOR: &str = "|--------|-------|\n";

/// Markdown table header for severity breakdowns
const SEVERITY_TABLE_HEADER: &str = "| Severity | Count |\n";
const SEVERITY_TABLE_SEPARATOR: &str = "|----------|-------|\n";

const DEPENDENCY_TABLE_HEADER: &str = "| Package | Version | Latest | Type | Source | License |\n";
const DEPENDENCY_TABLE_SEPARATOR: &str = "|---------|---------|--------|------|--------|---------|\n";

const VULN_TABLE_HEADER: &str = "| ID | Severity | CVSS | Fixed Version | Title |\n";
const VULN_TABLE_SEPARATOR: &str = "|----|----------|------|---------------|-------|\n";

/// MarkdownFormatter adapter for human-readable view output
///
/// Every tab starts with `# <title>`. A load error is rendered as a
/// warning block right under the title.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn or_dash(value: Option<&str>) -> String {
        match value {
            Some(v) if !v.is_empty() => Self::escape_markdown_table_cell(v),
            _ => "-".to_string(),
        }
    }

    fn render_count_table(output: &mut String, heading: &str, label: &str, counts: &BTreeMap<String, u64>) {
        if counts.is_empty() {
            return;
        }
        let _ = writeln!(output, "### {}\n", heading);
        let _ = writeln!(output, "| {} | Count |", label);
        output.push_str("|------|-------|\n");
        for (name, count) in counts {
            let _ = writeln!(output, "| {} | {} |", Self::escape_markdown_table_cell(name), count);
        }
        output.push('\n');
    }

    fn render_severity_counts(output: &mut String, counts: &SeverityCounts) {
        output.push_str(SEVERITY_TABLE_HEADER);
        output.push_str(SEVERITY_TABLE_SEPARATOR);
        for severity in Severity::ALL {
            let _ = writeln!(output, "| {} | {} |", severity, counts.get(severity));
        }
        let _ = writeln!(output, "| **Total** | {} |\n", counts.total);
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_header(&self, output: &mut String, view: &DashboardView) {
        let _ = writeln!(output, "# {}\n", view.title);
        if view.user != "Guest" {
            let _ = writeln!(output, "_Signed in as {}_\n", view.user);
        }
        if let Some(error) = &view.load_error {
            let first_line = error.lines().next().unwrap_or(error.as_str());
            let _ = writeln!(output, "> ⚠️ {}\n", first_line);
        }
    }

    fn render_metrics(&self, output: &mut String, metrics: &DashboardMetrics) {
        output.push_str(METRICS_TABLE_HEADER);
        output.push_str(METRICS_TABLE_SEPARATOR);
        for (label, value) in metrics.entries() {
            let _ = writeln!(output, "| {} | {} |", label, value);
        }
        output.push('\n');
    }

    fn render_service_list(&self, output: &mut String, list: &ServiceListView) {
        let _ = writeln!(
            output,
            "{} services, {} at high or critical risk.\n",
            list.services.len(),
            list.high_risk_count
        );
        output.push_str("| Service | Language | Risk | Open Vulnerabilities | Description |\n");
        output.push_str("|---------|----------|------|----------------------|-------------|\n");
        for card in &list.services {
            let (risk, vulns) = match &card.risk {
                Some(badge) => (
                    format!("{} ({})", badge.level, format_number(badge.score)),
                    badge.vulnerability_total.to_string(),
                ),
                None => ("-".to_string(), "-".to_string()),
            };
            let _ = writeln!(
                output,
                "| {} | {} | {} | {} | {} |",
                Self::escape_markdown_table_cell(&card.name),
                Self::escape_markdown_table_cell(&card.language),
                Self::escape_markdown_table_cell(&risk),
                vulns,
                Self::escape_markdown_table_cell(&card.description)
            );
        }
        output.push('\n');
    }

    fn render_technologies(&self, output: &mut String, view: &TechnologiesView) {
        if !view.primary_language.is_empty() {
            let _ = writeln!(output, "**Primary language:** {}\n", view.primary_language);
        }
        if !view.languages.is_empty() {
            output.push_str("## Languages\n\n| Language | Files |\n|----------|-------|\n");
            for (language, count) in &view.languages {
                let _ = writeln!(output, "| {} | {} |", Self::escape_markdown_table_cell(language), count);
            }
            output.push('\n');
        }

        for (heading, entries) in [
            ("Frameworks", &view.frameworks),
            ("Databases", &view.databases),
            ("Cloud Platforms", &view.cloud_platforms),
            ("Tools", &view.tools),
        ] {
            if entries.is_empty() {
                continue;
            }
            let _ = writeln!(output, "## {}\n", heading);
            output.push_str("| Name | Category | Confidence |\n|------|----------|------------|\n");
            for entry in entries {
                let _ = writeln!(
                    output,
                    "| {} | {} | {}% ({}) |",
                    Self::escape_markdown_table_cell(&entry.name),
                    Self::escape_markdown_table_cell(&entry.category),
                    entry.confidence_percent,
                    entry.badge
                );
            }
            output.push('\n');
        }
    }

    fn render_dependencies(&self, output: &mut String, view: &DependenciesView) {
        let _ = writeln!(
            output,
            "**Total:** {} | **Vulnerable:** {} | **Outdated:** {} | **Up to date:** {}\n",
            view.total_count, view.vulnerable_count, view.outdated_count, view.up_to_date_count
        );
        Self::render_count_table(output, "Licenses", "License", &view.license_distribution);
        Self::render_count_table(output, "Sources", "Source", &view.source_distribution);
        Self::render_count_table(output, "Types", "Type", &view.type_distribution);

        if view.filter_active {
            let _ = writeln!(output, "Showing {} of {} dependencies.\n", view.listed_count, view.total_count);
        }
        if view.dependencies.is_empty() {
            output.push_str("No dependencies match the current filters.\n\n");
            return;
        }
        output.push_str(DEPENDENCY_TABLE_HEADER);
        output.push_str(DEPENDENCY_TABLE_SEPARATOR);
        for dep in &view.dependencies {
            let _ = writeln!(
                output,
                "| {} | {} | {} | {} | {} | {} |",
                Self::escape_markdown_table_cell(&dep.name),
                Self::escape_markdown_table_cell(&dep.version),
                Self::or_dash(dep.latest_version.as_deref()),
                Self::escape_markdown_table_cell(&dep.dependency_type),
                Self::escape_markdown_table_cell(&dep.source),
                Self::escape_markdown_table_cell(&dep.license)
            );
        }
        output.push('\n');
    }

    fn render_apis(&self, output: &mut String, view: &ApisView) {
        for (heading, endpoints) in [
            ("REST APIs", &view.rest_apis),
            ("gRPC Services", &view.grpc_services),
            ("Endpoints", &view.endpoints),
        ] {
            if endpoints.is_empty() {
                continue;
            }
            let _ = writeln!(output, "## {}\n", heading);
            output.push_str("| Method | Path | Service | Description |\n|--------|------|---------|-------------|\n");
            for endpoint in endpoints {
                let _ = writeln!(
                    output,
                    "| {} | {} | {} | {} |",
                    Self::escape_markdown_table_cell(&endpoint.method),
                    Self::escape_markdown_table_cell(&endpoint.path),
                    Self::or_dash(endpoint.service.as_deref()),
                    Self::escape_markdown_table_cell(&endpoint.description)
                );
            }
            output.push('\n');
        }
    }

    fn render_infrastructure(&self, output: &mut String, view: &InfrastructureView) {
        if !view.pipelines.is_empty() {
            output.push_str("## Pipelines\n\n| Name | Type | Path | Status |\n|------|------|------|--------|\n");
            for pipeline in &view.pipelines {
                let _ = writeln!(
                    output,
                    "| {} | {} | {} | {} |",
                    Self::escape_markdown_table_cell(&pipeline.name),
                    Self::escape_markdown_table_cell(&pipeline.pipeline_type),
                    Self::escape_markdown_table_cell(&pipeline.path),
                    Self::escape_markdown_table_cell(pipeline.status_label())
                );
            }
            output.push('\n');
        }
        if !view.artifacts.is_empty() {
            output.push_str("## Artifacts\n\n| Name | Type | Path |\n|------|------|------|\n");
            for artifact in &view.artifacts {
                let _ = writeln!(
                    output,
                    "| {} | {} | {} |",
                    Self::escape_markdown_table_cell(&artifact.name),
                    Self::escape_markdown_table_cell(&artifact.artifact_type),
                    Self::escape_markdown_table_cell(&artifact.path)
                );
            }
            output.push('\n');
        }
        if !view.infrastructure.is_empty() {
            output.push_str("## Infrastructure as Code\n\n| Type | Resources | Providers | Environments |\n|------|-----------|-----------|--------------|\n");
            for resource in &view.infrastructure {
                let _ = writeln!(
                    output,
                    "| {} | {} | {} | {} |",
                    Self::escape_markdown_table_cell(&resource.resource_type),
                    Self::escape_markdown_table_cell(&resource.resources.join(", ")),
                    Self::escape_markdown_table_cell(&resource.providers.join(", ")),
                    Self::escape_markdown_table_cell(&resource.environments.join(", "))
                );
            }
            output.push('\n');
        }
    }

    fn render_activity(&self, output: &mut String, view: &RepositoryActivityView) {
        let summary = &view.summary;
        let _ = writeln!(
            output,
            "**Pull requests:** {} | **Commits:** {} | **Latest PRs:** {} ({} commits)\n",
            summary.total_pull_requests,
            summary.total_commits,
            summary.latest_pr_count,
            summary.latest_pr_commits
        );
        if view.pull_requests.is_empty() {
            return;
        }
        output.push_str("| # | Title | State | Author | Commits | Files |\n|---|-------|-------|--------|---------|-------|\n");
        for pr in &view.pull_requests {
            let _ = writeln!(
                output,
                "| {} | {} | {} | {} | {} | {} |",
                pr.number,
                Self::escape_markdown_table_cell(&pr.title),
                Self::escape_markdown_table_cell(&pr.state),
                Self::escape_markdown_table_cell(&pr.author),
                pr.commit_count,
                pr.file_count
            );
        }
        output.push('\n');
    }

    fn render_images(&self, output: &mut String, view: &ImagesView) {
        for image in &view.images {
            let _ = writeln!(output, "## {}\n", image.name);
            if let Some(base) = &image.base_image {
                let _ = writeln!(output, "**Base image:** {}\n", base);
            }
            let _ = writeln!(
                output,
                "{} layers, {} packages.\n",
                image.layers.len(),
                image.packages.len()
            );
            if image.packages.is_empty() {
                continue;
            }
            output.push_str("| Package | Version | License | Status | Vulnerabilities |\n|---------|---------|---------|--------|-----------------|\n");
            for package in &image.packages {
                let _ = writeln!(
                    output,
                    "| {} | {} | {} | {} | {} |",
                    Self::escape_markdown_table_cell(&package.name),
                    Self::escape_markdown_table_cell(&package.version),
                    Self::escape_markdown_table_cell(&package.license),
                    Self::escape_markdown_table_cell(&package.status),
                    Self::or_dash(Some(&package.vulnerability_ids.join(", ")))
                );
            }
            output.push('\n');
        }

        if !view.base_image_groups.is_empty() {
            output.push_str("## Images by Base Image\n\n");
            for (base, images) in &view.base_image_groups {
                let _ = writeln!(output, "- **{}**: {}", base, images.join(", "));
            }
            output.push('\n');
        }
    }

    fn render_base_images(&self, output: &mut String, view: &BaseImagesView) {
        let summary = &view.summary;
        let _ = writeln!(
            output,
            "**Base images:** {} | **Vulnerable:** {} | **Deprecated:** {}\n",
            summary.total_images, summary.vulnerable_images, summary.deprecated_images
        );
        Self::render_severity_counts(output, &summary.vulnerabilities);

        output.push_str("| Image | OS | Size | Layers | Last Updated | Freshness | Vulnerabilities | Fixable | Used By |\n");
        output.push_str("|-------|----|------|--------|--------------|-----------|-----------------|---------|---------|\n");
        for row in &view.base_images {
            let updated = match (row.last_updated.as_deref(), row.days_since_update) {
                (Some(date), Some(days)) => format!("{} ({} days)", date, days),
                (Some(date), None) => date.to_string(),
                _ => "-".to_string(),
            };
            let _ = writeln!(
                output,
                "| {} | {} | {} | {} | {} | {} | {} | {} | {} |",
                Self::escape_markdown_table_cell(&row.full_name),
                Self::escape_markdown_table_cell(&row.os),
                Self::escape_markdown_table_cell(&row.size),
                row.layers,
                Self::escape_markdown_table_cell(&updated),
                row.freshness.map(|f| f.label()).unwrap_or("-"),
                row.vulnerability_counts.total,
                row.fixable_count,
                Self::or_dash(Some(&row.used_by.join(", ")))
            );
        }
        output.push('\n');
    }

    fn render_security(&self, output: &mut String, view: &SecurityFindingsView) {
        let summary = &view.summary;
        let _ = writeln!(output, "**Total findings:** {}\n", summary.total_findings);
        output.push_str("| Severity | Count | Share |\n|----------|-------|-------|\n");
        for share in &view.severity_shares {
            let _ = writeln!(output, "| {} | {} | {:.1}% |", share.severity, share.count, share.percentage);
        }
        output.push('\n');
        Self::render_count_table(output, "Findings by Type", "Type", &summary.by_type);
        Self::render_count_table(output, "Findings by Service", "Service", &summary.by_service);
        Self::render_count_table(output, "Findings by Stage", "Stage", &summary.by_stage);

        if let Some(service) = &view.service_filter {
            let _ = writeln!(output, "## Findings for {}\n", service);
        } else {
            output.push_str("## Findings\n\n");
        }
        if view.findings.is_empty() {
            output.push_str("No findings.\n\n");
        } else {
            output.push_str("| ID | Service | Severity | Type | Stage | Description |\n|----|---------|----------|------|-------|-------------|\n");
            for tagged in &view.findings {
                let finding = &tagged.finding;
                let _ = writeln!(
                    output,
                    "| {} | {} | {} | {} | {} | {} |",
                    Self::escape_markdown_table_cell(&finding.id),
                    Self::escape_markdown_table_cell(&tagged.service_name),
                    Self::escape_markdown_table_cell(&finding.severity),
                    Self::escape_markdown_table_cell(&finding.finding_type),
                    Self::escape_markdown_table_cell(&finding.stage),
                    Self::escape_markdown_table_cell(&finding.description)
                );
            }
            output.push('\n');
        }

        let chains: Vec<_> = view
            .services
            .iter()
            .flat_map(|service| service.connected_findings.iter())
            .collect();
        if !chains.is_empty() {
            output.push_str("## Connected Findings\n\n");
            for chain in chains {
                let _ = writeln!(
                    output,
                    "- **{}** ({}): {} [{}]",
                    chain.name,
                    chain.status,
                    chain.stages.join(" → "),
                    chain.finding_ids.join(", ")
                );
            }
            output.push('\n');
        }
    }

    fn render_opensource_security(&self, output: &mut String, view: &OpensourceSecurityView) {
        let summary = &view.summary;
        let _ = writeln!(
            output,
            "**Packages:** {} ({} vulnerable, {} outdated) | **Images:** {} ({} vulnerable)\n",
            summary.total_packages,
            summary.vulnerable_packages,
            summary.outdated_packages,
            summary.total_images,
            summary.vulnerable_images
        );
        Self::render_severity_counts(output, &summary.vulnerabilities);
        Self::render_count_table(output, "Vulnerability Types", "Type", &summary.vulnerability_types);
        let progress = &summary.remediation_progress;
        let _ = writeln!(
            output,
            "**Remediation:** {} fixed, {} in progress, {} not started\n",
            progress.fixed, progress.in_progress, progress.not_started
        );

        if !view.search.query.is_empty() {
            let _ = writeln!(output, "## Search: \"{}\"\n", view.search.query);
            if view.search.packages.is_empty() && view.search.images.is_empty() {
                output.push_str("No results.\n\n");
            }
            for package in &view.search.packages {
                let _ = writeln!(output, "- 📦 {}@{} ({})", package.name, package.version, package.license);
            }
            for image in &view.search.images {
                let _ = writeln!(output, "- 🐳 {}", image.full_name);
            }
            output.push('\n');
        }

        if !view.vulnerable_packages.is_empty() {
            output.push_str("## Vulnerable Packages\n\n");
            for package in &view.vulnerable_packages {
                let _ = writeln!(
                    output,
                    "### {}@{}{}\n",
                    package.name,
                    package.version,
                    package
                        .latest_version
                        .as_deref()
                        .map(|latest| format!(" (latest {})", latest))
                        .unwrap_or_default()
                );
                output.push_str(VULN_TABLE_HEADER);
                output.push_str(VULN_TABLE_SEPARATOR);
                for vuln in &package.vulnerabilities {
                    let _ = writeln!(
                        output,
                        "| {} | {} | {:.1} | {} | {} |",
                        Self::escape_markdown_table_cell(vuln.display_id()),
                        Self::escape_markdown_table_cell(&vuln.severity),
                        vuln.cvss_score,
                        Self::or_dash(vuln.fixed_version.as_deref()),
                        Self::escape_markdown_table_cell(&vuln.title)
                    );
                }
                output.push('\n');
            }
        }

        if !view.vulnerable_images.is_empty() {
            output.push_str("## Vulnerable Images\n\n| Image | Size | Critical | High | Medium | Low |\n|-------|------|----------|------|--------|-----|\n");
            for image in &view.vulnerable_images {
                let counts = &image.vulnerability_counts;
                let _ = writeln!(
                    output,
                    "| {} | {} | {} | {} | {} | {} |",
                    Self::escape_markdown_table_cell(&image.full_name),
                    Self::escape_markdown_table_cell(&image.size),
                    counts.critical,
                    counts.high,
                    counts.medium,
                    counts.low
                );
            }
            output.push('\n');
        }
    }

    fn render_high_level(&self, output: &mut String, detail: &HighLevelDetail) {
        let _ = writeln!(output, "## {}\n", detail.name);
        if !detail.description.is_empty() {
            let _ = writeln!(output, "{}\n", detail.description);
        }
        let risk = &detail.risk;
        let _ = writeln!(
            output,
            "**Risk:** {} ({}) | **Trend:** {} | **Business impact:** {}",
            format_number(risk.score),
            risk.level,
            risk.trend.label(),
            risk.business_impact
        );
        if let Some(confidence) = risk.confidence_percent {
            let _ = writeln!(output, "**AI confidence:** {}%", confidence);
        }
        output.push('\n');

        let exposure = &detail.exposure;
        let _ = writeln!(
            output,
            "### Exposure\n\n{} vulnerabilities ({} open), {} public endpoints, {} exposed secrets.\n",
            exposure.vulnerability_total,
            exposure.open,
            exposure.endpoints.public_endpoints,
            exposure.endpoints.exposed_secrets
        );
        output.push_str("| Severity | Count | Share |\n|----------|-------|-------|\n");
        for share in &exposure.severity_shares {
            let _ = writeln!(output, "| {} | {} | {:.1}% |", share.severity, share.count, share.percentage);
        }
        output.push('\n');

        let compliance = &detail.compliance;
        let _ = writeln!(
            output,
            "### Compliance\n\nAdherence {}%, {} failed controls, {} policy violations.\n",
            format_number(compliance.adherence_score),
            compliance.failed_controls,
            compliance.policy_violations
        );

        let remediation = &detail.remediation;
        let _ = writeln!(
            output,
            "### Remediation\n\n{} breaches, MTTR {} hours, {} in progress, {} overdue.\n",
            remediation.breaches,
            format_number(remediation.mttr_hours),
            remediation.in_progress,
            remediation.overdue_count
        );

        if !detail.insights.is_empty() {
            output.push_str("### AI Insights\n\n");
            for insight in &detail.insights {
                let _ = writeln!(output, "- [{:?}] {}", insight.priority, insight.text);
            }
            output.push('\n');
        }
        if !detail.top_recommendations.is_empty() {
            output.push_str("### Top Recommendations\n\n");
            for rec in &detail.top_recommendations {
                let _ = writeln!(output, "- {} (priority: {}, impact: {})", rec.text, rec.priority, rec.impact);
            }
            output.push('\n');
        }
    }

    fn render_granular(&self, output: &mut String, detail: &GranularDetail) {
        let _ = writeln!(output, "## Vulnerabilities in {}\n", detail.name);
        if let Some(severity) = detail.severity_filter {
            let _ = writeln!(output, "Filtered to **{}** severity.\n", severity);
        }
        Self::render_severity_counts(output, &detail.severity_counts);
        if detail.vulnerabilities.is_empty() {
            output.push_str("No vulnerabilities match the current filter.\n\n");
        } else {
            output.push_str("| ID | Type | Severity | CVSS | Package | Status | Team |\n|----|------|----------|------|---------|--------|------|\n");
            for vuln in &detail.vulnerabilities {
                let _ = writeln!(
                    output,
                    "| {} | {} | {} | {:.1} | {} | {} | {} |",
                    Self::escape_markdown_table_cell(&vuln.id),
                    Self::escape_markdown_table_cell(&vuln.vulnerability_type),
                    Self::escape_markdown_table_cell(&vuln.severity),
                    vuln.cvss_score,
                    Self::escape_markdown_table_cell(&vuln.package),
                    Self::escape_markdown_table_cell(&vuln.status),
                    Self::escape_markdown_table_cell(&vuln.assigned_team)
                );
            }
            output.push('\n');
        }
        if !detail.recommendations.is_empty() {
            output.push_str("### Recommendations\n\n");
            for rec in &detail.recommendations {
                let _ = writeln!(output, "- {} (effort: {})", rec.text, rec.effort);
            }
            output.push('\n');
        }
    }

    fn render_service_owner(&self, output: &mut String, view: &ServiceOwnerView) {
        self.render_service_list(output, &view.service_list);
        if let Some(detail) = &view.high_level {
            self.render_high_level(output, detail);
        } else if let Some(name) = &view.selected_service {
            let _ = writeln!(output, "## {}\n\nNo service owner details for this service.\n", name);
        }
        if let Some(detail) = &view.granular {
            self.render_granular(output, detail);
        }

        output.push_str("## Copilot\n\n");
        for message in &view.chat {
            let speaker = match message.role {
                ChatRole::Ai => "🤖 Copilot",
                ChatRole::User => "🧑 You",
            };
            let _ = writeln!(output, "**{}:** {}\n", speaker, message.text);
        }
    }
}

impl ViewFormatter for MarkdownFormatter {
    fn format(&self, view: &DashboardView) -> Result<String> {
        let mut output = String::new();
        self.render_header(&mut output, view);

        match &view.content {
            ViewContent::Metrics(metrics) => self.render_metrics(&mut output, metrics),
            ViewContent::Microservices(list) => self.render_service_list(&mut output, list),
            ViewContent::Technologies(v) => self.render_technologies(&mut output, v),
            ViewContent::Dependencies(v) => self.render_dependencies(&mut output, v),
            ViewContent::Apis(v) => self.render_apis(&mut output, v),
            ViewContent::Infrastructure(v) => self.render_infrastructure(&mut output, v),
            ViewContent::Activity(v) => self.render_activity(&mut output, v),
            ViewContent::Images(v) => self.render_images(&mut output, v),
            ViewContent::BaseImages(v) => self.render_base_images(&mut output, v),
            ViewContent::Security(v) => self.render_security(&mut output, v),
            ViewContent::OpensourceSecurity(v) => self.render_opensource_security(&mut output, v),
            ViewContent::ServiceOwner(v) => self.render_service_owner(&mut output, v),
            ViewContent::Empty { message } => {
                let _ = writeln!(output, "_{}_\n", message);
            }
        }

        Ok(output)
    }
}
