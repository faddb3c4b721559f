use crate::db::{self, EnvironmentReading};
use crate::domain::models::UserRole;
use anyhow::Result;
use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2,
};
use chrono::Utc;
use rand_core::OsRng;
use sqlx::PgPool;
use uuid::Uuid;

struct SeedUser<'a> {
    username: &'a str,
    password: &'a str,
    role: UserRole,
    full_name: &'a str,
    position: &'a str,
    sector: &'a str,
    photo: &'a str,
    age: i32,
    shift: &'a str,
    stress: Option<(f64, f64)>, // (personal, professional)
}

/// Idempotent seed: the `gestor` account marks an initialized store, so a
/// second run is a no-op. Returns whether anything was written.
pub async fn seed_all(pool: &PgPool) -> Result<bool> {
    if db::find_user_by_username(pool, "gestor").await?.is_some() {
        return Ok(false);
    }

    seed_users(pool).await?;
    seed_environment(pool).await?;
    Ok(true)
}

async fn seed_users(pool: &PgPool) -> Result<()> {
    let users = vec![
        SeedUser {
            username: "gestor",
            password: "admin",
            role: UserRole::Gestor,
            full_name: "Marcos Silva",
            position: "Gestor Operacional",
            sector: "Gestão",
            photo: "https://i.pravatar.cc/150?img=12",
            age: 45,
            shift: "Integral",
            stress: None,
        },
        SeedUser {
            username: "funcionario",
            password: "admin",
            role: UserRole::Funcionario,
            full_name: "Ana Cai_1",
            position: "Caixa",
            sector: "Operacional",
            photo: "https://i.pravatar.cc/150?img=1",
            age: 33,
            shift: "Tarde",
            stress: Some((2.0, 2.0)),
        },
        SeedUser {
            username: "beatriz.cai",
            password: "admin",
            role: UserRole::Funcionario,
            full_name: "Beatriz Cai_2",
            position: "Caixa",
            sector: "Operacional",
            photo: "https://i.pravatar.cc/150?img=5",
            age: 28,
            shift: "Tarde",
            stress: Some((5.0, 4.0)),
        },
        SeedUser {
            username: "carlos.cha",
            password: "admin",
            role: UserRole::Funcionario,
            full_name: "Carlos Cha_1",
            position: "Chapa",
            sector: "Operacional",
            photo: "https://i.pravatar.cc/150?img=13",
            age: 40,
            shift: "Manhã",
            stress: Some((2.0, 3.0)),
        },
        SeedUser {
            username: "fernanda.cha2",
            password: "admin",
            role: UserRole::Funcionario,
            full_name: "Fernanda Cha_2",
            position: "Chapa",
            sector: "Operacional",
            photo: "https://i.pravatar.cc/150?img=9",
            age: 35,
            shift: "Noite",
            stress: Some((5.0, 5.0)),
        },
        SeedUser {
            username: "fernanda.cha3",
            password: "admin",
            role: UserRole::Funcionario,
            full_name: "Fernanda Cha_3",
            position: "Chapa",
            sector: "Operacional",
            photo: "https://i.pravatar.cc/150?img=10",
            age: 42,
            shift: "Tarde",
            stress: Some((4.0, 4.0)),
        },
        SeedUser {
            username: "juliana.mon",
            password: "admin",
            role: UserRole::Funcionario,
            full_name: "Juliana Mon_1",
            position: "Montagem de pedidos",
            sector: "Operacional",
            photo: "https://i.pravatar.cc/150?img=24",
            age: 28,
            shift: "Tarde",
            stress: Some((1.0, 2.0)),
        },
        SeedUser {
            username: "ana.mon",
            password: "admin",
            role: UserRole::Funcionario,
            full_name: "Ana Mon_2",
            position: "Montagem de pedidos",
            sector: "Operacional",
            photo: "https://i.pravatar.cc/150?img=20",
            age: 25,
            shift: "Manhã",
            stress: Some((3.0, 3.0)),
        },
        SeedUser {
            username: "lucas.sob",
            password: "admin",
            role: UserRole::Funcionario,
            full_name: "Lucas Sob_1",
            position: "Sobremesa",
            sector: "Operacional",
            photo: "https://i.pravatar.cc/150?img=15",
            age: 39,
            shift: "Manhã",
            stress: Some((1.0, 1.0)),
        },
    ];

    let argon = Argon2::default();
    for user in users {
        let salt = SaltString::generate(OsRng);
        let hash = argon
            .hash_password(user.password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
            .to_string();

        sqlx::query(
            r#"
            INSERT INTO users (id, username, password_hash, role, full_name, position, sector, photo, age, shift, stress_personal, stress_professional)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (username) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user.username)
        .bind(hash)
        .bind(user.role)
        .bind(user.full_name)
        .bind(user.position)
        .bind(user.sector)
        .bind(user.photo)
        .bind(user.age)
        .bind(user.shift)
        .bind(user.stress.map(|s| s.0))
        .bind(user.stress.map(|s| s.1))
        .execute(pool)
        .await?;
    }
    Ok(())
}

async fn seed_environment(pool: &PgPool) -> Result<()> {
    if db::latest_environment_reading(pool).await?.is_some() {
        return Ok(());
    }

    db::insert_environment_reading(
        pool,
        &EnvironmentReading {
            id: Uuid::new_v4(),
            temperature: 23.5,
            humidity: 65.0,
            air_quality: 85,
            recorded_at: Utc::now(),
        },
    )
    .await?;
    Ok(())
}
