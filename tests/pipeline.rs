mod common;

use serde_json::json;

use common::{client, page, vacancy, FakeTransport};
use vacancy_browser::core::career_client::{
    DETAIL_VACANCY_ENDPOINT, LIST_VACANCY_ENDPOINT, VACANCY_EDUCATION_ENDPOINT,
    VACANCY_MAJOR_ENDPOINT,
};
use vacancy_browser::{
    FilterCategory, FilterOption, FilterState, Identifier, Notification, Session, StreamWeights,
    VacancyBrowser,
};

#[tokio::test]
async fn empty_first_page_skips_side_requests() {
    let transport = FakeTransport::new();
    transport.reply(LIST_VACANCY_ENDPOINT, page(vec![]));

    let browser = VacancyBrowser::new(client(&transport, 15));
    let ranked = browser
        .apply(&FilterState::new(), &StreamWeights::defaults())
        .await
        .unwrap();

    assert!(ranked.is_empty());
    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, LIST_VACANCY_ENDPOINT);
}

#[tokio::test]
async fn pages_are_concatenated_in_request_order() {
    let transport = FakeTransport::new();
    transport
        .reply(
            LIST_VACANCY_ENDPOINT,
            page(vec![
                vacancy(1, "Treasury", "Kontrak", 1.0, 10.0),
                vacancy(2, "Treasury", "Kontrak", 1.0, 10.0),
            ]),
        )
        .reply(
            LIST_VACANCY_ENDPOINT,
            page(vec![vacancy(3, "Treasury", "Kontrak", 1.0, 10.0)]),
        )
        .reply(LIST_VACANCY_ENDPOINT, json!({ "data": null }));

    let client = client(&transport, 2);
    let filters = FilterState::new()
        .select(FilterCategory::Stream, &[FilterOption::new(12, "Treasury")])
        .to_query_filters();
    let listed = client.list_vacancies(&filters).await.unwrap();

    let ids: Vec<String> = listed.iter().map(|v| v.vacancy_id.to_string()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);

    let bodies = transport.calls_to(LIST_VACANCY_ENDPOINT);
    assert_eq!(bodies.len(), 3);
    for (index, body) in bodies.iter().enumerate() {
        assert_eq!(body["page"], json!(index + 1));
        assert_eq!(body["size"], json!(2));
        assert_eq!(body["stream_id"], json!([12]));
        assert_eq!(body["company_id"], json!([]));
        assert_eq!(body["job_title"], json!(""));
    }
}

#[tokio::test]
async fn failing_page_fails_the_listing() {
    let transport = FakeTransport::new();
    transport
        .reply(
            LIST_VACANCY_ENDPOINT,
            page(vec![vacancy(1, "Treasury", "Kontrak", 1.0, 10.0)]),
        )
        .fail(LIST_VACANCY_ENDPOINT, "connection reset");

    let result = client(&transport, 1)
        .list_vacancies(&FilterState::new().to_query_filters())
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn side_request_failure_fails_apply_and_keeps_previous_list() {
    let transport = FakeTransport::new();
    transport
        .reply(
            LIST_VACANCY_ENDPOINT,
            page(vec![vacancy(1, "Treasury", "Kontrak", 1.0, 10.0)]),
        )
        .reply(LIST_VACANCY_ENDPOINT, page(vec![]))
        .reply(VACANCY_MAJOR_ENDPOINT, json!({ "data": [] }))
        .reply(VACANCY_EDUCATION_ENDPOINT, json!({ "data": [] }))
        .reply(
            LIST_VACANCY_ENDPOINT,
            page(vec![vacancy(2, "Treasury", "Kontrak", 1.0, 10.0)]),
        )
        .reply(LIST_VACANCY_ENDPOINT, page(vec![]))
        .reply(VACANCY_MAJOR_ENDPOINT, json!({ "data": [] }))
        .fail(VACANCY_EDUCATION_ENDPOINT, "HTTP 500");

    let browser = VacancyBrowser::new(client(&transport, 15));
    let mut session = Session::default();

    let snapshot = session.begin_apply();
    let outcome = browser.apply(&snapshot.filters, &snapshot.weights).await;
    assert_eq!(session.finish_apply(outcome), &Notification::Found(1));

    let snapshot = session.begin_apply();
    let outcome = browser.apply(&snapshot.filters, &snapshot.weights).await;
    assert!(outcome.is_err());

    assert_eq!(session.finish_apply(outcome), &Notification::FetchFailed);
    assert_eq!(session.vacancies().len(), 1);
    assert_eq!(
        session.vacancies()[0].vacancy.vacancy.vacancy_id,
        Identifier::Number(1)
    );
}

#[tokio::test]
async fn apply_merges_side_data_and_ranks() {
    let transport = FakeTransport::new();
    transport
        .reply(
            LIST_VACANCY_ENDPOINT,
            page(vec![
                vacancy(7, "Astronomy", "Magang", 9.0, 10.0),
                vacancy(8, "Developer Information Technology", "Pegawai Tetap", 10.0, 100.0),
            ]),
        )
        .reply(
            VACANCY_MAJOR_ENDPOINT,
            json!({ "data": [
                { "vacancy_id": 8, "major_type": "in", "list_major": ["Teknik Informatika"] }
            ]}),
        )
        .reply(
            VACANCY_EDUCATION_ENDPOINT,
            json!({ "data": [
                { "vacancy_id": 8, "education_level": "S1", "score_min": "3.00", "age_max": 27 },
                { "vacancy_id": 99, "education_level": "S2" }
            ]}),
        );

    let browser = VacancyBrowser::new(client(&transport, 15));
    let ranked = browser
        .apply(&FilterState::new(), &StreamWeights::defaults())
        .await
        .unwrap();

    assert_eq!(ranked.len(), 2);
    let best = &ranked[0];
    assert_eq!(best.vacancy.vacancy.vacancy_id, Identifier::Number(8));
    assert_eq!(best.score, 83);
    assert_eq!(best.vacancy.major.list_major, vec!["Teknik Informatika"]);
    assert_eq!(best.vacancy.education.education_level.as_deref(), Some("S1"));
    assert_eq!(best.vacancy.education.score_min, Some(3.0));

    let other = &ranked[1];
    assert_eq!(other.vacancy.vacancy.vacancy_id, Identifier::Number(7));
    assert!(other.vacancy.major.is_unrestricted());
    assert_eq!(other.vacancy.education.education_level, None);

    let side_bodies = transport.calls_to(VACANCY_MAJOR_ENDPOINT);
    assert_eq!(side_bodies[0]["vacancy_id"], json!([7, 8]));
}

#[tokio::test]
async fn detail_is_fetched_once_and_merged() {
    let transport = FakeTransport::new();
    transport.reply(
        DETAIL_VACANCY_ENDPOINT,
        json!({ "data": [{
            "description": "<p>Kelola &amp; analisa data</p>",
            "requirement": "<ul><li>S1</li></ul>",
            "qualifications": { "gender": "F", "education_level": [] }
        }]}),
    );

    let browser = VacancyBrowser::new(client(&transport, 15));
    let mut listed = vacancy_browser::Vacancy::new(5, "Analyst");
    listed.company_name = "PT Contoh".to_string();

    let detailed = browser.load_detail(&listed).await.unwrap();
    assert_eq!(detailed.title, "Analyst");
    assert_eq!(detailed.company_name, "PT Contoh");
    assert!(detailed.has_description());
    assert_eq!(
        detailed.qualifications.as_ref().and_then(|q| q.gender.as_deref()),
        Some("F")
    );

    let again = browser.load_detail(&detailed).await.unwrap();
    assert_eq!(again, detailed);
    let detail_calls = transport.calls_to(DETAIL_VACANCY_ENDPOINT);
    assert_eq!(detail_calls, vec![json!({ "vacancy_id": 5 })]);
}

#[tokio::test]
async fn options_are_mapped_and_searched() {
    let transport = FakeTransport::new();
    transport.reply(
        FilterCategory::Company.endpoint(),
        json!({ "data": [
            { "id": 1, "company_name": "PT Bank Rakyat" },
            { "id": 2, "company_name": "PT Pertamina" },
            { "id": 3 }
        ]}),
    );

    let options = client(&transport, 15)
        .list_options(FilterCategory::Company, Some("bank"))
        .await
        .unwrap();

    assert_eq!(options, vec![FilterOption::new(1, "PT Bank Rakyat")]);
}

#[tokio::test]
async fn listing_ends_when_data_is_missing() {
    let transport = FakeTransport::new();
    transport
        .reply(
            LIST_VACANCY_ENDPOINT,
            page(vec![vacancy(1, "Treasury", "Kontrak", 1.0, 10.0)]),
        )
        .reply(LIST_VACANCY_ENDPOINT, json!({}));

    let listed = client(&transport, 1)
        .list_vacancies(&FilterState::new().to_query_filters())
        .await
        .unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(transport.calls_to(LIST_VACANCY_ENDPOINT).len(), 2);
}

#[tokio::test]
async fn side_data_joins_across_id_representations() {
    let transport = FakeTransport::new();
    transport
        .reply(
            LIST_VACANCY_ENDPOINT,
            page(vec![vacancy(8, "Treasury", "Kontrak", 1.0, 10.0)]),
        )
        .reply(
            VACANCY_MAJOR_ENDPOINT,
            json!({ "data": [{ "vacancy_id": "8", "major_type": "in", "list_major": ["TI"] }] }),
        )
        .reply(
            VACANCY_EDUCATION_ENDPOINT,
            json!({ "data": [{ "vacancy_id": "8", "education_level": "S1" }] }),
        );

    let ranked = VacancyBrowser::new(client(&transport, 15))
        .apply(&FilterState::new(), &StreamWeights::defaults())
        .await
        .unwrap();

    assert_eq!(ranked[0].vacancy.major.list_major, vec!["TI"]);
    assert_eq!(ranked[0].vacancy.education.education_level.as_deref(), Some("S1"));
}

#[tokio::test]
async fn experience_level_options_use_their_id_field() {
    let transport = FakeTransport::new();
    transport.reply(
        FilterCategory::ExperienceLevel.endpoint(),
        json!({ "data": [
            { "experience_level_id": 1, "experience_level_name": "Fresh Graduate" },
            { "experience_level_id": 2, "experience_level_name": "Professional" }
        ]}),
    );

    let options = client(&transport, 15)
        .list_options(FilterCategory::ExperienceLevel, None)
        .await
        .unwrap();

    assert_eq!(
        options,
        vec![
            FilterOption::new(1, "Fresh Graduate"),
            FilterOption::new(2, "Professional"),
        ]
    );
}
