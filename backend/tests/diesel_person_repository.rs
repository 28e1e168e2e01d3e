//! Integration tests for `DieselPersonRepository` against embedded PostgreSQL.
//!
//! Opt-in: run with `RUN_PG_EMBEDDED=1 cargo test -- --ignored`. The suite
//! starts a throwaway cluster via `pg-embed-setup-unpriv`, applies the
//! embedded migrations and drives the repository contract end to end.

use chrono::NaiveDate;
use pg_embedded_setup_unpriv::TestCluster;
use person_api::domain::ports::{PersonRecord, PersonRepository, PersonRepositoryError};
use person_api::domain::{Person, PersonDraft, PersonId};
use person_api::outbound::persistence::{
    DbPool, DieselPersonRepository, PoolConfig, run_migrations_blocking,
};
use tokio::runtime::Runtime;

fn draft(first: &str, last: &str) -> PersonDraft {
    let birth_date = NaiveDate::from_ymd_opt(1815, 12, 10).expect("valid date");
    PersonDraft::try_from_parts(first, last, birth_date).expect("valid draft")
}

#[test]
#[ignore = "requires embedded Postgres binaries; opt-in via RUN_PG_EMBEDDED=1"]
fn diesel_repository_honours_the_port_contract() {
    if std::env::var("RUN_PG_EMBEDDED").as_deref() != Ok("1") {
        eprintln!("SKIP-TEST-CLUSTER: set RUN_PG_EMBEDDED=1 to run");
        return;
    }

    let cluster = TestCluster::new().expect("embedded Postgres should start");
    let url = cluster.connection().database_url("postgres");
    run_migrations_blocking(&url).expect("migrations apply");
    assert_eq!(
        run_migrations_blocking(&url).expect("migrations re-run"),
        0,
        "re-running migrations is a no-op"
    );

    let runtime = Runtime::new().expect("tokio runtime");
    runtime.block_on(async {
        let pool = DbPool::new(PoolConfig::new(&url).with_max_size(2).with_min_idle(Some(1)))
            .await
            .expect("pool builds");
        let repo = DieselPersonRepository::new(pool);

        let ada = repo
            .save(PersonRecord::Transient(draft("Ada", "Lovelace")))
            .await
            .expect("insert ada");
        let grace = repo
            .save(PersonRecord::Transient(draft("Grace", "Hopper")))
            .await
            .expect("insert grace");
        assert_ne!(ada.id(), grace.id());

        let found = repo.find_by_id(ada.id()).await.expect("lookup");
        assert_eq!(found, Some(ada.clone()));

        let renamed = ada.clone().with_details(draft("Ada", "King"));
        let saved = repo
            .save(PersonRecord::Persisted(renamed.clone()))
            .await
            .expect("update ada");
        assert_eq!(saved, renamed);

        repo.delete(&grace).await.expect("delete grace");
        repo.delete(&grace).await.expect("second delete is a no-op");
        assert_eq!(repo.find_all().await.expect("list"), vec![renamed]);

        let ghost = Person::new(PersonId::new(i64::MAX), draft("No", "One"));
        let err = repo
            .save(PersonRecord::Persisted(ghost))
            .await
            .expect_err("absent row");
        assert_eq!(err, PersonRepositoryError::missing(i64::MAX));

        let next = repo
            .save(PersonRecord::Transient(draft("Alan", "Turing")))
            .await
            .expect("insert alan");
        assert!(next.id() > grace.id(), "identifiers are never reused");
    });
}
