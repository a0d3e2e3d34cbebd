//! PostgreSQL implementation of MemberRepository

use async_trait::async_trait;
use sqlx::{Encode, PgPool, Postgres, QueryBuilder, Type};
use tracing::instrument;

use directory_core::entities::{FilterOptions, Member, MemberChanges, MemberFilter, NewMember};
use directory_core::error::DomainError;
use directory_core::traits::{MemberRepository, RepoResult};

use crate::models::{FilterOptionRow, MemberModel};

use super::error::{map_db_error, map_write_error};

const MEMBER_COLUMNS: &str = "id, name, email, phone, year_of_admission, degree_program, \
     roll_number, department, city, permanent_address, photo_url, bio, social_links, \
     is_verified, created_at, updated_at";

/// PostgreSQL implementation of MemberRepository
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    /// Create a new PgMemberRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Build an `ILIKE` pattern matching `term` anywhere, with wildcards in the
/// term itself taken literally
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Compile a filter into `SELECT ... WHERE ... ORDER BY`
fn build_list_query(filter: &MemberFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {MEMBER_COLUMNS} FROM members WHERE TRUE"));

    if let Some(year) = filter.year_of_admission {
        builder.push(" AND year_of_admission = ");
        builder.push_bind(year);
    }
    if let Some(degree) = &filter.degree_program {
        builder.push(" AND degree_program = ");
        builder.push_bind(degree.clone());
    }
    if let Some(city) = &filter.city {
        builder.push(" AND city ILIKE ");
        builder.push_bind(contains_pattern(city));
    }
    if let Some(term) = &filter.search_term {
        builder.push(" AND name ILIKE ");
        builder.push_bind(contains_pattern(term));
    }

    builder.push(" ORDER BY created_at DESC, id DESC");
    builder
}

/// Append `, column = $n` when a value is supplied
fn push_assignment<'args, T>(builder: &mut QueryBuilder<'args, Postgres>, column: &str, value: Option<T>)
where
    T: 'args + Encode<'args, Postgres> + Type<Postgres>,
{
    if let Some(value) = value {
        builder.push(", ");
        builder.push(column);
        builder.push(" = ");
        builder.push_bind(value);
    }
}

/// Compile a partial update; `updated_at` is always refreshed
fn build_update_query(id: i32, changes: &MemberChanges) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("UPDATE members SET updated_at = NOW()");

    push_assignment(&mut builder, "name", changes.name.clone());
    push_assignment(&mut builder, "email", changes.email.clone());
    push_assignment(&mut builder, "phone", changes.phone.clone());
    push_assignment(&mut builder, "year_of_admission", changes.year_of_admission);
    push_assignment(&mut builder, "degree_program", changes.degree_program.clone());
    push_assignment(&mut builder, "roll_number", changes.roll_number.clone());
    push_assignment(&mut builder, "department", changes.department.clone());
    push_assignment(&mut builder, "city", changes.city.clone());
    push_assignment(&mut builder, "permanent_address", changes.permanent_address.clone());
    push_assignment(&mut builder, "photo_url", changes.photo_url.clone());
    push_assignment(&mut builder, "bio", changes.bio.clone());
    push_assignment(&mut builder, "social_links", changes.social_links.clone());

    builder.push(" WHERE id = ");
    builder.push_bind(id);
    builder.push(" RETURNING ");
    builder.push(MEMBER_COLUMNS);
    builder
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn list(&self, filter: &MemberFilter) -> RepoResult<Vec<Member>> {
        let filter = filter.clone().normalized();

        let rows = build_list_query(&filter)
            .build_query_as::<MemberModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Member::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i32) -> RepoResult<Option<Member>> {
        let result = sqlx::query_as::<_, MemberModel>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Member::from))
    }

    #[instrument(skip(self, member), fields(roll_number = %member.roll_number))]
    async fn create(&self, member: &NewMember) -> RepoResult<Member> {
        let model = sqlx::query_as::<_, MemberModel>(&format!(
            r"
            INSERT INTO members (name, email, phone, year_of_admission, degree_program, roll_number,
                                 department, city, permanent_address, photo_url, bio, social_links,
                                 is_verified)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {MEMBER_COLUMNS}
            "
        ))
        .bind(&member.name)
        .bind(&member.email)
        .bind(&member.phone)
        .bind(member.year_of_admission)
        .bind(&member.degree_program)
        .bind(&member.roll_number)
        .bind(&member.department)
        .bind(&member.city)
        .bind(&member.permanent_address)
        .bind(&member.photo_url)
        .bind(&member.bio)
        .bind(&member.social_links)
        .bind(member.is_verified)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(e, || DomainError::RollNumberTaken(member.roll_number.clone()))
        })?;

        Ok(Member::from(model))
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: i32, changes: &MemberChanges) -> RepoResult<Option<Member>> {
        let result = build_update_query(id, changes)
            .build_query_as::<MemberModel>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                map_write_error(e, || {
                    DomainError::RollNumberTaken(changes.roll_number.clone().unwrap_or_default())
                })
            })?;

        Ok(result.map(Member::from))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i32) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn filter_options(&self) -> RepoResult<FilterOptions> {
        let rows = sqlx::query_as::<_, FilterOptionRow>(
            r"
            SELECT DISTINCT year_of_admission, degree_program, city
            FROM members
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(FilterOptions::from_rows(rows.into_iter().map(Into::into)))
    }
}
