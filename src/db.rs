use anyhow::Context;
use chrono::NaiveDate;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::{AssignmentRecord, CapturedAssignment, Course};

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

pub async fn seed(pool: &PgPool) -> anyhow::Result<()> {
    let course_id = upsert_course(pool, "FIT2004", "Algorithms and Data Structures").await?;

    let assignments = vec![
        (
            "Assignment 1",
            Some(81.61),
            100.0,
            0.25,
            NaiveDate::from_ymd_opt(2026, 8, 14),
        ),
        (
            "Assignment 2",
            Some(72.13),
            100.0,
            0.25,
            NaiveDate::from_ymd_opt(2026, 9, 25),
        ),
        (
            "Final Exam",
            None,
            100.0,
            0.5,
            NaiveDate::from_ymd_opt(2026, 11, 12),
        ),
    ];

    for (name, score, total, weight, due_on) in assignments {
        upsert_assignment(
            pool,
            course_id,
            name,
            score,
            total,
            weight,
            Some(due_on.context("invalid date")?),
        )
        .await?;
    }

    Ok(())
}

pub async fn upsert_course(pool: &PgPool, code: &str, title: &str) -> anyhow::Result<Uuid> {
    let id: Uuid = sqlx::query(
        r#"
        INSERT INTO grade_projector.courses (id, code, title)
        VALUES ($1, $2, $3)
        ON CONFLICT (code) DO UPDATE
        SET title = EXCLUDED.title
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(code)
    .bind(title)
    .fetch_one(pool)
    .await?
    .get("id");

    Ok(id)
}

async fn upsert_assignment(
    pool: &PgPool,
    course_id: Uuid,
    name: &str,
    score: Option<f64>,
    total: f64,
    weight: f64,
    due_on: Option<NaiveDate>,
) -> anyhow::Result<u64> {
    let result = sqlx::query(
        r#"
        INSERT INTO grade_projector.assignments
        (id, course_id, name, score, total, weight, due_on)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (course_id, name) DO UPDATE
        SET score = EXCLUDED.score,
            total = EXCLUDED.total,
            weight = EXCLUDED.weight,
            due_on = COALESCE(EXCLUDED.due_on, grade_projector.assignments.due_on)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(course_id)
    .bind(name)
    .bind(score)
    .bind(total)
    .bind(weight)
    .bind(due_on)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn fetch_course(pool: &PgPool, code: &str) -> anyhow::Result<Option<Course>> {
    let row = sqlx::query("SELECT id, code, title FROM grade_projector.courses WHERE code = $1")
        .bind(code)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| Course {
        id: row.get("id"),
        code: row.get("code"),
        title: row.get("title"),
    }))
}

pub async fn fetch_assignments(
    pool: &PgPool,
    course_id: Uuid,
) -> anyhow::Result<Vec<AssignmentRecord>> {
    let rows = sqlx::query(
        "SELECT id, name, score, total, weight, due_on \
         FROM grade_projector.assignments \
         WHERE course_id = $1 \
         ORDER BY name",
    )
    .bind(course_id)
    .fetch_all(pool)
    .await?;

    let mut records = Vec::new();
    for row in rows {
        records.push(AssignmentRecord {
            id: row.get("id"),
            name: row.get("name"),
            score: row.get("score"),
            total: row.get("total"),
            weight: row.get("weight"),
            due_on: row.get("due_on"),
        });
    }

    Ok(records)
}

pub async fn import_csv(pool: &PgPool, csv_path: &std::path::Path) -> anyhow::Result<usize> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        course_code: String,
        course_title: String,
        name: String,
        score: Option<f64>,
        total: f64,
        weight: f64,
        due_on: Option<NaiveDate>,
    }

    let mut reader = csv::Reader::from_path(csv_path)?;
    let mut stored = 0usize;

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        let course_id = upsert_course(pool, &row.course_code, &row.course_title).await?;

        let affected = upsert_assignment(
            pool,
            course_id,
            &row.name,
            row.score,
            row.total,
            row.weight,
            row.due_on,
        )
        .await?;

        if affected > 0 {
            stored += 1;
        }
    }

    Ok(stored)
}

pub async fn store_captured(
    pool: &PgPool,
    course_id: Uuid,
    rows: &[CapturedAssignment],
) -> anyhow::Result<usize> {
    let mut stored = 0usize;

    for row in rows {
        let affected = upsert_assignment(
            pool,
            course_id,
            &row.name,
            row.score,
            row.total,
            row.weight,
            None,
        )
        .await?;

        if affected > 0 {
            stored += 1;
        }
    }

    Ok(stored)
}
