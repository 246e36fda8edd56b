//! `charts` subcommand: seven fixed descriptive charts of the salary dataset.
//!
//! Each step reads the columns it needs, builds its series (see [`series`])
//! and writes one numbered PNG into the output directory (see [`render`]).
//! Steps are independent; a failing step stops the run but leaves the files
//! of earlier steps in place. The run ends with a manifest of the directory.

pub mod manifest;
pub mod render;
pub mod series;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use log::{debug, info};

use crate::{cli::ChartsArgs, dataset::Dataset};

use render::{BarColor, Labels};

pub const HISTOGRAM_BINS: usize = 20;

const SALARY: &str = "Monthly_Salary";
const DEPARTMENT: &str = "Department";
const EDUCATION: &str = "Education_Level";
const CITY: &str = "City";
const EXPERIENCE: &str = "Experience_Years";

const SALARY_AXIS: &str = "Monthly Salary ($)";
const AVERAGE_SALARY_AXIS: &str = "Average Monthly Salary ($)";
const BANNER_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    SalaryHistogram,
    SalaryByDepartment,
    AverageSalaryByDepartment,
    ExperienceVsSalary,
    DepartmentShare,
    AverageSalaryByEducation,
    EmployeesByCity,
}

impl ChartKind {
    pub const ALL: [ChartKind; 7] = [
        ChartKind::SalaryHistogram,
        ChartKind::SalaryByDepartment,
        ChartKind::AverageSalaryByDepartment,
        ChartKind::ExperienceVsSalary,
        ChartKind::DepartmentShare,
        ChartKind::AverageSalaryByEducation,
        ChartKind::EmployeesByCity,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            ChartKind::SalaryHistogram => "01_histogram_salary.png",
            ChartKind::SalaryByDepartment => "02_boxplot_salary_by_department.png",
            ChartKind::AverageSalaryByDepartment => "03_bar_avg_salary_by_department.png",
            ChartKind::ExperienceVsSalary => "04_scatter_experience_vs_salary.png",
            ChartKind::DepartmentShare => "05_pie_distribution_by_department.png",
            ChartKind::AverageSalaryByEducation => "06_bar_avg_salary_by_education.png",
            ChartKind::EmployeesByCity => "07_count_employees_by_city.png",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::SalaryHistogram => "Monthly Salary Distribution",
            ChartKind::SalaryByDepartment => "Salary Distribution by Department",
            ChartKind::AverageSalaryByDepartment => "Average Salary by Department",
            ChartKind::ExperienceVsSalary => "Experience vs Salary",
            ChartKind::DepartmentShare => "Employee Distribution by Department",
            ChartKind::AverageSalaryByEducation => "Average Salary by Education Level",
            ChartKind::EmployeesByCity => "Employees per City",
        }
    }

    pub fn render(self, dataset: &Dataset, path: &Path) -> Result<()> {
        let title = self.title();
        match self {
            ChartKind::SalaryHistogram => {
                let values = series::present_values(dataset, SALARY)?;
                let bins = series::histogram_bins(&values, HISTOGRAM_BINS);
                debug!("Histogram of {} value(s) in {} bin(s)", values.len(), bins.len());
                let labels = Labels { title, x: SALARY_AXIS, y: "Frequency" };
                render::histogram(path, labels, &bins)
            }
            ChartKind::SalaryByDepartment => {
                let groups = series::values_by_group(dataset, DEPARTMENT, SALARY)?;
                let labels = Labels { title, x: DEPARTMENT, y: SALARY_AXIS };
                render::box_plot(path, labels, &groups)
            }
            ChartKind::AverageSalaryByDepartment => {
                let means = series::means_by_group(dataset, DEPARTMENT, SALARY)?;
                let labels = Labels { title, x: DEPARTMENT, y: AVERAGE_SALARY_AXIS };
                render::vertical_bars(path, labels, &means, BarColor::SteelBlue)
            }
            ChartKind::ExperienceVsSalary => {
                let points = series::paired_values(dataset, EXPERIENCE, SALARY)?;
                let labels = Labels { title, x: "Years of Experience", y: SALARY_AXIS };
                render::scatter(path, labels, &points)
            }
            ChartKind::DepartmentShare => {
                let counts = series::value_counts(dataset, DEPARTMENT)?;
                render::pie(path, title, &counts)
            }
            ChartKind::AverageSalaryByEducation => {
                let means = series::means_by_group(dataset, EDUCATION, SALARY)?;
                let labels = Labels { title, x: AVERAGE_SALARY_AXIS, y: "Education Level" };
                render::horizontal_bars(path, labels, &means, BarColor::Coral)
            }
            ChartKind::EmployeesByCity => {
                let counts = series::value_counts(dataset, CITY)?
                    .into_iter()
                    .map(|(city, count)| (city, count as f64))
                    .collect::<Vec<_>>();
                let labels = Labels { title, x: CITY, y: "Number of Employees" };
                render::vertical_bars(path, labels, &counts, BarColor::MediumPurple)
            }
        }
    }
}

pub fn execute(args: &ChartsArgs) -> Result<()> {
    let source = &args.source;
    let dataset = Dataset::open(
        &source.input,
        source.delimiter,
        source.input_encoding.as_deref(),
    )?;

    if !render::font_available() {
        bail!("No usable '{}' font found for chart text", render::FONT);
    }
    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("Creating output directory {:?}", args.output_dir))?;
    let absolute = fs::canonicalize(&args.output_dir)
        .with_context(|| format!("Resolving output directory {:?}", args.output_dir))?;

    println!("Generating charts from the employee dataset...");
    println!(
        "Dataset: {} rows, {} columns",
        dataset.row_count(),
        dataset.column_count()
    );
    println!("Output directory: {}\n", absolute.display());

    let written = generate_all(&dataset, &args.output_dir)?;

    let banner = "=".repeat(BANNER_WIDTH);
    println!("\n{banner}");
    println!(
        "All {} charts saved to '{}'",
        written.len(),
        args.output_dir.display()
    );
    println!("{banner}");
    println!("\nGenerated files:");
    let artifacts = manifest::list_artifacts(&args.output_dir)?;
    print!("{}", manifest::render_manifest(&artifacts));
    Ok(())
}

/// Renders every chart into the existing `output_dir` and returns the written
/// paths in step order.
pub fn generate_all(dataset: &Dataset, output_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(ChartKind::ALL.len());
    for (idx, kind) in ChartKind::ALL.into_iter().enumerate() {
        println!("{}. Rendering {}...", idx + 1, kind.title());
        let path = output_dir.join(kind.file_name());
        kind.render(dataset, &path)
            .with_context(|| format!("Rendering {}", kind.file_name()))?;
        info!("Wrote {:?}", path);
        println!("   saved: {}", kind.file_name());
        written.push(path);
    }
    Ok(written)
}
