use git2::{Repository, Signature, Time};
use gitactivity::analysis::{analyze_repository, AliasTable};
use gitactivity::types::{AnalysisMode, AnalysisOptions, DateRange};
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

// 2024-01-10 08:00 UTC
const BASE_TIME: i64 = 1_704_873_600;

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

fn run_git_command(repo_path: &Path, args: &[&str]) -> String {
    Command::new("git")
        .current_dir(repo_path)
        .args(args)
        .output()
        .map(|output| String::from_utf8_lossy(&output.stdout).to_string())
        .unwrap_or_default()
}

fn get_git_commit_count(repo_path: &Path) -> u64 {
    let output = run_git_command(repo_path, &["rev-list", "--count", "HEAD"]);
    output.trim().parse().unwrap_or(0)
}

fn get_git_line_stats(repo_path: &Path) -> u64 {
    let output = run_git_command(repo_path, &["log", "--numstat", "--format="]);
    let mut changed = 0;
    for line in output.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() >= 2 {
            if let (Ok(a), Ok(d)) = (parts[0].parse::<u64>(), parts[1].parse::<u64>()) {
                changed += a + d;
            }
        }
    }
    changed
}

/// A linear history where files are created, edited and deleted.
fn setup_history(temp_dir: &TempDir) -> Repository {
    let repo = Repository::init(temp_dir.path()).unwrap();
    let authors = ["alice@x.com", "bob@x.com", "carol@x.com"];

    for i in 0..20usize {
        let file_name = format!("file_{}.txt", i % 5);
        let file_path = temp_dir.path().join(&file_name);
        let mut index = repo.index().unwrap();

        if i % 7 == 6 && file_path.exists() {
            fs::remove_file(&file_path).unwrap();
            index.remove_path(Path::new(&file_name)).unwrap();
        } else {
            let content: String = (0..=i).map(|n| format!("line {} of {}\n", n, i)).collect();
            fs::write(&file_path, content).unwrap();
            index.add_path(Path::new(&file_name)).unwrap();
        }
        index.write().unwrap();

        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
        let when = Time::new(BASE_TIME + i as i64 * 7_200, 0);
        let signature = Signature::new("Test User", authors[i % authors.len()], &when).unwrap();
        let parents = match repo.head() {
            Ok(head) => vec![head.peel_to_commit().unwrap()],
            Err(_) => Vec::new(),
        };
        let parent_refs: Vec<_> = parents.iter().collect();
        repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            &format!("Change {}", file_name),
            &tree,
            &parent_refs,
        )
        .unwrap();
    }
    repo
}

#[test]
fn test_commit_count_accuracy() {
    if !git_available() {
        eprintln!("git not found, skipping");
        return;
    }
    let temp_dir = TempDir::new().unwrap();
    setup_history(&temp_dir);

    let options = AnalysisOptions {
        mode: AnalysisMode::Commits,
        range: DateRange::unbounded(),
    };
    let activity = analyze_repository(temp_dir.path(), &options, &AliasTable::empty()).unwrap();

    assert_eq!(activity.totals().total(), get_git_commit_count(temp_dir.path()));
    assert_eq!(activity.totals().total(), 20);
}

#[test]
fn test_line_totals_match_numstat() {
    if !git_available() {
        eprintln!("git not found, skipping");
        return;
    }
    let temp_dir = TempDir::new().unwrap();
    setup_history(&temp_dir);

    let options = AnalysisOptions {
        mode: AnalysisMode::Lines,
        range: DateRange::unbounded(),
    };
    let activity = analyze_repository(temp_dir.path(), &options, &AliasTable::empty()).unwrap();

    let expected = get_git_line_stats(temp_dir.path());
    assert!(expected > 0);
    assert_eq!(activity.totals().total(), expected);
}
