use std::path::Path;

use super::*;

const REPORT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<pmd-cpd>
<duplication lines="12" tokens="75">
<file line="10" path="/ws/src/main/java/Foo.java"/>
<file line="80" path="/ws/src/main/java/Bar.java"/>
<codefragment><![CDATA[    public void copy() {
        doSomething();
    }]]></codefragment>
</duplication>
<duplication lines="30" tokens="140">
<file line="1" path="/ws/a.java"/>
<file line="100" path="/ws/a.java"/>
<file line="200" path="/ws/b.java"/>
</duplication>
</pmd-cpd>
"#;

#[test]
fn accepts_only_cpd_reports() {
    assert!(CpdParser.accepts(REPORT));
    assert!(!CpdParser.accepts("<simian version=\"2\"/>"));
}

#[test]
fn parses_duplications_with_fragment() {
    let sets = CpdParser.parse(REPORT, Path::new("cpd.xml")).unwrap();

    assert_eq!(sets.len(), 2);
    assert_eq!(sets[0].lines, 12);
    assert_eq!(sets[0].tokens, Some(75));
    assert_eq!(sets[0].blocks.len(), 2);
    assert_eq!(sets[0].blocks[1].file_name, "/ws/src/main/java/Bar.java");
    assert_eq!(sets[0].blocks[1].start_line, 80);
    assert!(sets[0].fragment.as_deref().unwrap().contains("doSomething();"));
    assert_eq!(sets[1].blocks.len(), 3);
    assert!(sets[1].fragment.is_none());
}

#[test]
fn parses_pmd7_report_with_extra_elements() {
    let report = r#"<?xml version="1.0" encoding="UTF-8"?>
<pmd-cpd xmlns="https://pmd-code.org/schema/cpd-report" pmdVersion="7.0.0" version="1.0.0">
   <file path="/ws/A.java" totalNumberOfTokens="300"/>
   <file path="/ws/B.java" totalNumberOfTokens="200"/>
   <duplication lines="33" tokens="239">
      <file begintoken="2" column="29" endcolumn="75" endline="54" endtoken="240" line="22" path="/ws/A.java"/>
      <file begintoken="9" column="29" endcolumn="75" endline="129" endtoken="247" line="97" path="/ws/B.java"/>
      <codefragment><![CDATA[int x = 1;]]></codefragment>
   </duplication>
</pmd-cpd>
"#;

    let sets = CpdParser.parse(report, Path::new("cpd.xml")).unwrap();

    assert_eq!(sets.len(), 1);
    assert_eq!(sets[0].blocks[0].start_line, 22);
    assert_eq!(sets[0].blocks[1].file_name, "/ws/B.java");
}

#[test]
fn empty_report_has_no_sets() {
    let sets = CpdParser
        .parse("<pmd-cpd></pmd-cpd>", Path::new("cpd.xml"))
        .unwrap();
    assert!(sets.is_empty());
}

#[test]
fn malformed_report_is_a_parse_error() {
    let err = CpdParser
        .parse(
            "<pmd-cpd><duplication lines=\"abc\"><file line=\"1\" path=\"x\"/></duplication></pmd-cpd>",
            Path::new("broken.xml"),
        )
        .unwrap_err();

    assert!(matches!(err, DryGuardError::Parse { ref path, .. } if path == Path::new("broken.xml")));
}
