use super::*;

#[test]
fn test_git_suffix_is_stripped() {
    assert_eq!(
        normalize("https://example.com/repo.git"),
        "https://example.com/repo"
    );
}

#[test]
fn test_git_suffix_kept_for_exceptions() {
    assert_eq!(
        normalize("https://repo.or.cz/foo.git"),
        "https://repo.or.cz/foo.git"
    );
    assert_eq!(
        normalize("https://git.tuxfamily.org/fanwor/fanwor.git"),
        "https://git.tuxfamily.org/fanwor/fanwor.git"
    );
}

#[test]
fn test_trailing_slash_hosts() {
    assert_eq!(
        normalize("https://git.savannah.gnu.org/git/foo"),
        "https://git.savannah.gnu.org/git/foo/"
    );
    assert_eq!(
        normalize("https://anongit.freedesktop.org/git/bar.git"),
        "https://anongit.freedesktop.org/git/bar.git/"
    );
}

#[test]
fn test_bitbucket_points_to_commits() {
    assert_eq!(
        normalize("https://bitbucket.org/user/game.git"),
        "https://bitbucket.org/user/game/commits/"
    );
}

#[test]
fn test_svn_and_cvs_become_browsable() {
    assert_eq!(
        normalize("https://svn.code.sf.net/p/foo/code"),
        "http://svn.code.sf.net/p/foo/code/"
    );
    assert_eq!(
        normalize("http://cvs.savannah.nongnu.org:/sources/bar"),
        "http://cvs.savannah.nongnu.org/viewvc/bar/"
    );
    assert_eq!(
        normalize("http://cvs.savannah.gnu.org:/sources/baz"),
        "http://cvs.savannah.gnu.org/viewvc/baz/"
    );
}

#[test]
fn test_unmatched_urls_are_unchanged() {
    assert_eq!(normalize("https://github.com/a/b"), "https://github.com/a/b");
}

#[test]
fn test_ignored_links() {
    assert!(is_ignored("https://git.code.sf.net/p/foo/code"));
    assert!(is_ignored("http://bzr.sourceforge.net/bzrroot/foo"));
    assert!(!is_ignored("https://github.com/a/b"));
}
