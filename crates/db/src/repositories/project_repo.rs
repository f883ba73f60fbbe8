//! Repository for the `projects` table.
//!
//! Slug assignment lives here because uniqueness can only be decided
//! against the store: creation probes numbered candidates until one is
//! free, and the `uq_projects_slug` constraint closes the race window
//! between the probe and the insert.

use edifica_core::slug::{generate_slug, slug_candidate};
use edifica_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, ProjectQuery, UpdateProject};

/// Column list shared across queries; every read joins the category for
/// its name.
const COLUMNS: &str = "p.id, p.name, p.slug, p.category_id, c.name AS category_name, \
     p.location, p.description, p.year, p.service_type, p.levels, p.area, \
     p.status, p.extra_info, p.is_featured, p.created_at, p.updated_at";

/// Ordering fields exposed on the list endpoint. Anything else falls
/// back to the default (newest first).
fn order_clause(ordering: Option<&str>) -> &'static str {
    match ordering {
        Some("created_at") => "p.created_at ASC",
        Some("-created_at") | None => "p.created_at DESC",
        Some("name") => "p.name ASC",
        Some("-name") => "p.name DESC",
        Some("year") => "p.year ASC NULLS LAST",
        Some("-year") => "p.year DESC NULLS LAST",
        Some(_) => "p.created_at DESC",
    }
}

/// True when `err` is a unique violation on the given constraint.
fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505")
                && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, deriving a unique slug from its name.
    ///
    /// Probes `base`, `base-1`, `base-2`, ... with one existence check
    /// per candidate and inserts at the first free suffix. If a
    /// concurrent creation claims the candidate between the probe and
    /// the insert, the unique violation restarts the probe loop.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let base = generate_slug(&input.name);

        let mut n = 0u32;
        loop {
            while Self::slug_exists(pool, &slug_candidate(&base, n)).await? {
                n += 1;
            }
            let slug = slug_candidate(&base, n);

            match Self::insert(pool, input, &slug).await {
                Err(ref e) if is_unique_violation(e, "uq_projects_slug") => {
                    // Lost the race for this candidate; resume probing
                    // from the next suffix.
                    n += 1;
                }
                other => return other,
            }
        }
    }

    async fn insert(
        pool: &PgPool,
        input: &CreateProject,
        slug: &str,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "WITH inserted AS (
                INSERT INTO projects
                    (name, slug, category_id, location, description, year,
                     service_type, levels, area, status, extra_info, is_featured)
                VALUES ($1, $2, $3, $4, COALESCE($5, ''), $6, $7, $8, $9,
                        COALESCE($10, 'in_progress'), $11, COALESCE($12, FALSE))
                RETURNING *
             )
             SELECT {COLUMNS} FROM inserted p
             JOIN categories c ON c.id = p.category_id"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(slug)
            .bind(input.category_id)
            .bind(&input.location)
            .bind(&input.description)
            .bind(input.year)
            .bind(&input.service_type)
            .bind(&input.levels)
            .bind(&input.area)
            .bind(&input.status)
            .bind(&input.extra_info)
            .bind(input.is_featured)
            .fetch_one(pool)
            .await
    }

    /// Check whether a project with the given id exists. Used by media
    /// upload handlers to reject uploads for missing projects before
    /// touching storage.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM projects WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(exists.0)
    }

    /// Check whether any project already uses `slug`.
    pub async fn slug_exists(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM projects WHERE slug = $1)")
                .bind(slug)
                .fetch_one(pool)
                .await?;
        Ok(exists.0)
    }

    /// Find a project by its slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects p
             JOIN categories c ON c.id = p.category_id
             WHERE p.slug = $1"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List projects matching `params`, paginated.
    pub async fn search(
        pool: &PgPool,
        params: &ProjectQuery,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Project>, sqlx::Error> {
        let (where_clause, binds) = Self::build_filter(params);
        let order = order_clause(params.ordering.as_deref());
        let query = format!(
            "SELECT {COLUMNS} FROM projects p
             JOIN categories c ON c.id = p.category_id
             {where_clause}
             ORDER BY {order}
             LIMIT ${} OFFSET ${}",
            binds + 1,
            binds + 2,
        );

        let mut q = sqlx::query_as::<_, Project>(&query);
        q = Self::bind_filter(q, params);
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Count projects matching `params` (for pagination metadata).
    pub async fn count(pool: &PgPool, params: &ProjectQuery) -> Result<i64, sqlx::Error> {
        let (where_clause, _) = Self::build_filter(params);
        let query = format!("SELECT COUNT(*) FROM projects p {where_clause}");

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        q = Self::bind_filter_scalar(q, params);
        q.fetch_one(pool).await
    }

    /// Update a project addressed by slug. Only non-`None` fields are
    /// applied; the slug itself is never touched.
    ///
    /// Returns `None` if no row with the given slug exists.
    pub async fn update(
        pool: &PgPool,
        slug: &str,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "WITH updated AS (
                UPDATE projects SET
                    name = COALESCE($2, name),
                    category_id = COALESCE($3, category_id),
                    location = COALESCE($4, location),
                    description = COALESCE($5, description),
                    year = COALESCE($6, year),
                    service_type = COALESCE($7, service_type),
                    levels = COALESCE($8, levels),
                    area = COALESCE($9, area),
                    status = COALESCE($10, status),
                    extra_info = COALESCE($11, extra_info),
                    is_featured = COALESCE($12, is_featured),
                    updated_at = NOW()
                WHERE slug = $1
                RETURNING *
             )
             SELECT {COLUMNS} FROM updated p
             JOIN categories c ON c.id = p.category_id"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(slug)
            .bind(&input.name)
            .bind(input.category_id)
            .bind(&input.location)
            .bind(&input.description)
            .bind(input.year)
            .bind(&input.service_type)
            .bind(&input.levels)
            .bind(&input.area)
            .bind(&input.status)
            .bind(&input.extra_info)
            .bind(input.is_featured)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project by slug. Child media rows cascade in the store;
    /// the caller is responsible for collecting their file paths first.
    /// Returns `true` if a row was removed.
    pub async fn delete_by_slug(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE slug = $1")
            .bind(slug)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List the ids of all projects in a category. Used to collect
    /// media file paths before a category delete cascades.
    pub async fn ids_in_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM projects WHERE category_id = $1")
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    // -- Dynamic filter helpers ---------------------------------------------

    /// Build the WHERE clause for `params`, returning it together with
    /// the number of bind slots it consumes.
    fn build_filter(params: &ProjectQuery) -> (String, u32) {
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if params.category.is_some() {
            conditions.push(format!("p.category_id = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.status.is_some() {
            conditions.push(format!("p.status = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.service_type.is_some() {
            conditions.push(format!("p.service_type = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.is_featured.is_some() {
            conditions.push(format!("p.is_featured = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.year.is_some() {
            conditions.push(format!("p.year = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.search.is_some() {
            conditions.push(format!(
                "(p.name ILIKE ${bind_idx} OR p.location ILIKE ${bind_idx} \
                 OR p.service_type ILIKE ${bind_idx} OR p.area ILIKE ${bind_idx} \
                 OR p.status ILIKE ${bind_idx} OR p.description ILIKE ${bind_idx})"
            ));
            bind_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        (where_clause, bind_idx - 1)
    }

    fn bind_filter<'q>(
        mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, Project, sqlx::postgres::PgArguments>,
        params: &'q ProjectQuery,
    ) -> sqlx::query::QueryAs<'q, sqlx::Postgres, Project, sqlx::postgres::PgArguments> {
        if let Some(category) = params.category {
            q = q.bind(category);
        }
        if let Some(ref status) = params.status {
            q = q.bind(status);
        }
        if let Some(ref service_type) = params.service_type {
            q = q.bind(service_type);
        }
        if let Some(is_featured) = params.is_featured {
            q = q.bind(is_featured);
        }
        if let Some(year) = params.year {
            q = q.bind(year);
        }
        if let Some(ref search) = params.search {
            q = q.bind(format!("%{search}%"));
        }
        q
    }

    fn bind_filter_scalar<'q>(
        mut q: sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments>,
        params: &'q ProjectQuery,
    ) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments> {
        if let Some(category) = params.category {
            q = q.bind(category);
        }
        if let Some(ref status) = params.status {
            q = q.bind(status);
        }
        if let Some(ref service_type) = params.service_type {
            q = q.bind(service_type);
        }
        if let Some(is_featured) = params.is_featured {
            q = q.bind(is_featured);
        }
        if let Some(year) = params.year {
            q = q.bind(year);
        }
        if let Some(ref search) = params.search {
            q = q.bind(format!("%{search}%"));
        }
        q
    }
}
